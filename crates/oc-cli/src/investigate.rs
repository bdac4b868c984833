// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! `oncall investigate` and `oncall watch`

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use oc_api_contract::InvestigationRequest;
use oc_client_api::ClientApi;
use oc_core::{
    submit_and_watch, submit_investigation, InvestigationWatcher, WatchHandle,
    DEFAULT_POLL_INTERVAL,
};

use crate::render;

#[derive(clap::Args, Clone)]
pub struct InvestigateArgs {
    /// Repository id the failure belongs to
    #[arg(long)]
    pub repo: i64,
    /// The error message observed in the failed deployment
    #[arg(long)]
    pub error: String,
    /// Read deployment logs from this file
    #[arg(long)]
    pub logs_file: Option<PathBuf>,
    /// Commit SHA of the failing deployment
    #[arg(long)]
    pub commit: Option<String>,
    /// Submit without waiting for the result
    #[arg(long)]
    pub no_watch: bool,
    /// Poll interval in milliseconds
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL.as_millis() as u64)]
    pub interval_ms: u64,
}

impl InvestigateArgs {
    pub async fn run(self, client: Arc<dyn ClientApi>) -> Result<()> {
        let mut request = InvestigationRequest::new(self.repo, self.error);
        if let Some(path) = &self.logs_file {
            let logs = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            request = request.with_deployment_logs(logs);
        }
        if let Some(sha) = self.commit {
            request = request.with_commit_sha(sha);
        }

        if self.no_watch {
            let id = submit_investigation(client.as_ref(), &request).await?;
            println!("Investigation {id} started. Track it with: oncall watch {id}");
            return Ok(());
        }

        let interval = Duration::from_millis(self.interval_ms);
        let handle = submit_and_watch(client, &request, interval).await?;
        println!(
            "Investigation {} started, polling for status...",
            handle.investigation_id().unwrap_or_default()
        );
        watch_to_completion(handle).await
    }
}

#[derive(clap::Args, Clone)]
pub struct WatchArgs {
    /// Investigation id to watch
    pub investigation_id: i64,
    /// Poll interval in milliseconds
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL.as_millis() as u64)]
    pub interval_ms: u64,
}

impl WatchArgs {
    pub async fn run(self, client: Arc<dyn ClientApi>) -> Result<()> {
        if self.investigation_id <= 0 {
            bail!("Investigation id must be positive");
        }
        let interval = Duration::from_millis(self.interval_ms);
        let handle = InvestigationWatcher::spawn(client, self.investigation_id, interval);
        watch_to_completion(handle).await
    }
}

/// Print each lifecycle update until the investigation reaches a
/// terminal phase, then print the decoded diagnostic.
async fn watch_to_completion(mut handle: WatchHandle) -> Result<()> {
    while handle.changed().await {
        println!("{}", render::render_progress(&handle.lifecycle()));
    }

    let final_state = handle.join().await;
    println!();
    println!("{}", render::render_diagnostic(&final_state.diagnostic()));
    Ok(())
}

/// `oncall investigations`
pub async fn list_investigations(client: &dyn ClientApi) -> Result<()> {
    let investigations = client.list_investigations().await?;
    if investigations.is_empty() {
        println!("No investigations yet.");
        return Ok(());
    }
    for summary in investigations {
        println!("{}", render::render_summary_row(&summary));
    }
    Ok(())
}
