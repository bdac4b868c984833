// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Investigation submission flow
//!
//! Validates an error report client-side, submits it, and hands the
//! returned identifier to a fresh lifecycle. Submissions are never
//! retried automatically; the caller is responsible for preventing
//! duplicate submissions while one is in flight.

use std::sync::Arc;
use std::time::Duration;

use oc_api_contract::{validation::validate_investigation_request, InvestigationRequest};
use oc_client_api::ClientApi;

use crate::error::SubmitError;
use crate::watcher::{InvestigationWatcher, WatchHandle};

/// Submit a validated investigation request.
///
/// Missing required fields fail fast with no network call. A success
/// response without an `investigation_id` is a contract violation and
/// surfaces as [`SubmitError::MissingInvestigationId`].
pub async fn submit_investigation(
    client: &dyn ClientApi,
    request: &InvestigationRequest,
) -> Result<i64, SubmitError> {
    validate_investigation_request(request)?;

    let response = client.start_investigation(request).await?;
    let investigation_id = response
        .investigation_id
        .ok_or(SubmitError::MissingInvestigationId)?;

    tracing::info!(investigation_id, "investigation submitted");
    Ok(investigation_id)
}

/// Submit an investigation and immediately start watching it.
///
/// The returned handle begins in `Loading` and follows the backend's
/// reported statuses until terminal.
pub async fn submit_and_watch(
    client: Arc<dyn ClientApi>,
    request: &InvestigationRequest,
    interval: Duration,
) -> Result<WatchHandle, SubmitError> {
    let investigation_id = submit_investigation(client.as_ref(), request).await?;
    Ok(InvestigationWatcher::spawn(client, investigation_id, interval))
}
