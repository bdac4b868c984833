// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Client-observed investigation state machine
//!
//! One `InvestigationLifecycle` instance tracks one investigation
//! identifier. Terminal phases latch: a new investigation requires a
//! fresh instance. The machine copies the service-reported status
//! verbatim and never infers transitions on its own.

use oc_api_contract::{DecodedDiagnostic, DiagnosticPayload, Investigation, InvestigationStatus};

/// Phases of the client-observed investigation lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvestigationPhase {
    /// No valid identifier yet
    Idle,
    /// Identifier known, first snapshot not yet received
    Loading,
    Pending,
    Investigating,
    Completed,
    Failed,
}

impl InvestigationPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    fn from_status(status: InvestigationStatus) -> Self {
        match status {
            InvestigationStatus::Pending => Self::Pending,
            InvestigationStatus::Investigating => Self::Investigating,
            InvestigationStatus::Completed => Self::Completed,
            InvestigationStatus::Failed => Self::Failed,
        }
    }
}

/// State machine for one investigation as seen by this client
#[derive(Debug, Clone)]
pub struct InvestigationLifecycle {
    id: Option<i64>,
    phase: InvestigationPhase,
    snapshot: Option<Investigation>,
    last_fetch_failed: bool,
}

impl Default for InvestigationLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl InvestigationLifecycle {
    /// Start in `Idle` with no identifier
    pub fn new() -> Self {
        Self {
            id: None,
            phase: InvestigationPhase::Idle,
            snapshot: None,
            last_fetch_failed: false,
        }
    }

    /// Start tracking the given identifier, entering `Loading`.
    ///
    /// Returns false and stays put for a non-positive identifier or
    /// when an identifier was already assigned.
    pub fn start(&mut self, investigation_id: i64) -> bool {
        if investigation_id <= 0 || self.id.is_some() {
            return false;
        }
        self.id = Some(investigation_id);
        self.phase = InvestigationPhase::Loading;
        true
    }

    /// Shorthand for a lifecycle already tracking an identifier
    pub fn for_investigation(investigation_id: i64) -> Self {
        let mut lifecycle = Self::new();
        lifecycle.start(investigation_id);
        lifecycle
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn phase(&self) -> InvestigationPhase {
        self.phase
    }

    /// Most recently applied snapshot, if any
    pub fn snapshot(&self) -> Option<&Investigation> {
        self.snapshot.as_ref()
    }

    /// Transient hint that the latest fetch failed. Cleared by the next
    /// successful snapshot; never blocks further polling.
    pub fn last_fetch_failed(&self) -> bool {
        self.last_fetch_failed
    }

    /// Apply a freshly fetched snapshot.
    ///
    /// The new snapshot replaces the previous one wholesale; fields are
    /// never merged. Snapshots arriving after a terminal phase are
    /// ignored, as are snapshots for a different identifier.
    pub fn apply(&mut self, snapshot: Investigation) {
        if self.phase.is_terminal() {
            return;
        }
        match self.id {
            Some(id) if id == snapshot.id => {}
            _ => return,
        }
        self.phase = InvestigationPhase::from_status(snapshot.status);
        self.snapshot = Some(snapshot);
        self.last_fetch_failed = false;
    }

    /// Record a failed fetch. State does not transition.
    pub fn record_fetch_failure(&mut self) {
        self.last_fetch_failed = true;
    }

    /// Decode the diagnostic payload of the current snapshot.
    ///
    /// Recomputed on every call; with no snapshot or no payload the
    /// result has no fields populated.
    pub fn diagnostic(&self) -> DecodedDiagnostic {
        DiagnosticPayload::decode(self.snapshot.as_ref().and_then(|s| s.diagnostic_payload()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(id: i64, status: InvestigationStatus) -> Investigation {
        Investigation {
            id,
            status,
            error_message: "Deployment failed".to_string(),
            root_cause: None,
            suggested_fix: None,
            created_at: None,
            completed_at: None,
        }
    }

    #[test]
    fn starts_idle_and_enters_loading_on_valid_id() {
        let mut lifecycle = InvestigationLifecycle::new();
        assert_eq!(lifecycle.phase(), InvestigationPhase::Idle);

        assert!(lifecycle.start(7));
        assert_eq!(lifecycle.phase(), InvestigationPhase::Loading);
        assert_eq!(lifecycle.id(), Some(7));
    }

    #[test]
    fn invalid_identifier_stays_idle() {
        let mut lifecycle = InvestigationLifecycle::new();
        assert!(!lifecycle.start(0));
        assert!(!lifecycle.start(-3));
        assert_eq!(lifecycle.phase(), InvestigationPhase::Idle);
        assert_eq!(lifecycle.id(), None);
    }

    #[test]
    fn visits_statuses_in_snapshot_order() {
        let mut lifecycle = InvestigationLifecycle::for_investigation(1);
        let mut phases = Vec::new();

        for status in [
            InvestigationStatus::Pending,
            InvestigationStatus::Investigating,
            InvestigationStatus::Completed,
        ] {
            lifecycle.apply(snapshot(1, status));
            phases.push(lifecycle.phase());
        }

        assert_eq!(
            phases,
            vec![
                InvestigationPhase::Pending,
                InvestigationPhase::Investigating,
                InvestigationPhase::Completed,
            ]
        );
    }

    #[test]
    fn first_snapshot_may_be_terminal() {
        let mut lifecycle = InvestigationLifecycle::for_investigation(1);
        lifecycle.apply(snapshot(1, InvestigationStatus::Failed));
        assert_eq!(lifecycle.phase(), InvestigationPhase::Failed);
    }

    #[test]
    fn terminal_phase_latches() {
        let mut lifecycle = InvestigationLifecycle::for_investigation(1);
        lifecycle.apply(snapshot(1, InvestigationStatus::Completed));
        lifecycle.apply(snapshot(1, InvestigationStatus::Investigating));
        assert_eq!(lifecycle.phase(), InvestigationPhase::Completed);
    }

    #[test]
    fn snapshot_for_other_identifier_is_ignored() {
        let mut lifecycle = InvestigationLifecycle::for_investigation(1);
        lifecycle.apply(snapshot(99, InvestigationStatus::Completed));
        assert_eq!(lifecycle.phase(), InvestigationPhase::Loading);
        assert!(lifecycle.snapshot().is_none());
    }

    #[test]
    fn fetch_failure_does_not_transition() {
        let mut lifecycle = InvestigationLifecycle::for_investigation(1);
        lifecycle.apply(snapshot(1, InvestigationStatus::Pending));
        lifecycle.record_fetch_failure();

        assert_eq!(lifecycle.phase(), InvestigationPhase::Pending);
        assert!(lifecycle.last_fetch_failed());

        lifecycle.apply(snapshot(1, InvestigationStatus::Investigating));
        assert!(!lifecycle.last_fetch_failed());
    }

    #[test]
    fn snapshot_replaces_wholesale() {
        let mut lifecycle = InvestigationLifecycle::for_investigation(1);

        let mut first = snapshot(1, InvestigationStatus::Investigating);
        first.suggested_fix = Some("placeholder".to_string());
        lifecycle.apply(first);

        // Second snapshot has no suggested_fix; it must not survive
        lifecycle.apply(snapshot(1, InvestigationStatus::Investigating));
        assert!(lifecycle.snapshot().unwrap().suggested_fix.is_none());
    }

    #[test]
    fn diagnostic_decodes_completed_payload() {
        let mut lifecycle = InvestigationLifecycle::for_investigation(1);
        assert!(lifecycle.diagnostic().is_empty());

        let mut done = snapshot(1, InvestigationStatus::Completed);
        done.root_cause = Some(r#"{"root_cause": "missing env var", "action": "patch"}"#.into());
        lifecycle.apply(done);

        let decoded = lifecycle.diagnostic();
        assert_eq!(decoded.root_cause.as_deref(), Some("missing env var"));
    }
}
