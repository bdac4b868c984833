// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Cancellable investigation status poller
//!
//! The watcher owns its timer and cancellation flag: it polls the
//! backend on a fixed interval, feeds snapshots into an
//! [`InvestigationLifecycle`], and publishes the updated lifecycle on a
//! watch channel. It stops itself on a terminal status and can be
//! cancelled at any point, including while a fetch is in flight; a
//! cancelled fetch's response is discarded and never mutates state.

use std::sync::Arc;
use std::time::Duration;

use oc_client_api::ClientApi;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::lifecycle::InvestigationLifecycle;

/// Poll cadence used by the console views
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Spawns polling tasks for investigations
pub struct InvestigationWatcher;

impl InvestigationWatcher {
    /// Start polling the given investigation.
    ///
    /// The first fetch is issued immediately; each subsequent fetch
    /// waits `interval` after the previous one completed, so polls
    /// never overlap.
    pub fn spawn(
        client: Arc<dyn ClientApi>,
        investigation_id: i64,
        interval: Duration,
    ) -> WatchHandle {
        let lifecycle = InvestigationLifecycle::for_investigation(investigation_id);
        let (state_tx, state_rx) = watch::channel(lifecycle.clone());
        let (cancel_tx, cancel_rx) = watch::channel(false);

        let task = tokio::spawn(poll_loop(
            client,
            investigation_id,
            interval,
            lifecycle,
            state_tx,
            cancel_rx,
        ));

        WatchHandle {
            state: state_rx,
            cancel: cancel_tx,
            task,
        }
    }

    /// Start polling with the default 2 s cadence
    pub fn spawn_default(client: Arc<dyn ClientApi>, investigation_id: i64) -> WatchHandle {
        Self::spawn(client, investigation_id, DEFAULT_POLL_INTERVAL)
    }
}

async fn poll_loop(
    client: Arc<dyn ClientApi>,
    investigation_id: i64,
    interval: Duration,
    mut lifecycle: InvestigationLifecycle,
    state_tx: watch::Sender<InvestigationLifecycle>,
    mut cancel_rx: watch::Receiver<bool>,
) {
    loop {
        // Race the fetch against cancellation: a response arriving for
        // a torn-down view must not be applied.
        let fetched = tokio::select! {
            biased;
            _ = cancel_rx.changed() => {
                tracing::debug!(investigation_id, "watch cancelled while fetch in flight");
                return;
            }
            result = client.get_investigation(investigation_id) => result,
        };

        match fetched {
            Ok(snapshot) => {
                tracing::debug!(investigation_id, status = %snapshot.status, "snapshot fetched");
                lifecycle.apply(snapshot);
                if state_tx.send(lifecycle.clone()).is_err() {
                    // No one is watching anymore
                    return;
                }
                if lifecycle.phase().is_terminal() {
                    tracing::debug!(investigation_id, "terminal status reached, polling stops");
                    return;
                }
            }
            Err(err) => {
                // Transient: keep the last snapshot and retry next tick
                tracing::warn!(investigation_id, error = %err, "snapshot fetch failed");
                lifecycle.record_fetch_failure();
                if state_tx.send(lifecycle.clone()).is_err() {
                    return;
                }
            }
        }

        tokio::select! {
            biased;
            _ = cancel_rx.changed() => {
                tracing::debug!(investigation_id, "watch cancelled");
                return;
            }
            _ = tokio::time::sleep(interval) => {}
        }
    }
}

/// Handle to a running investigation watch.
///
/// Dropping the handle cancels the watch: the poll task observes the
/// closed cancellation channel and exits without issuing further
/// fetches.
pub struct WatchHandle {
    state: watch::Receiver<InvestigationLifecycle>,
    cancel: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl WatchHandle {
    /// Identifier being watched
    pub fn investigation_id(&self) -> Option<i64> {
        self.state.borrow().id()
    }

    /// Current lifecycle state (most recently published)
    pub fn lifecycle(&self) -> InvestigationLifecycle {
        self.state.borrow().clone()
    }

    /// Wait for the next published update. Returns false once the poll
    /// task has stopped and no further updates will arrive.
    pub async fn changed(&mut self) -> bool {
        self.state.changed().await.is_ok()
    }

    /// Cancel the watch. Idempotent; no poll fires afterwards.
    pub fn cancel(&self) {
        let _ = self.cancel.send(true);
    }

    /// Whether the poll task has stopped (terminal status reached or
    /// cancelled)
    pub fn is_stopped(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the poll task to stop and return the final lifecycle
    /// state.
    pub async fn join(self) -> InvestigationLifecycle {
        let _ = self.task.await;
        self.state.borrow().clone()
    }
}
