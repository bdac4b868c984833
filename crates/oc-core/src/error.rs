// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for the investigation submission flow

use oc_api_contract::ApiContractError;
use oc_client_api::ClientApiError;
use thiserror::Error;

/// Errors surfaced when submitting a new investigation.
///
/// Transient poll failures are deliberately absent: the watcher
/// swallows them at its boundary and retries on the next tick.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Required fields missing or blank; no network call was issued
    #[error("Invalid investigation request: {0}")]
    Validation(#[from] ApiContractError),

    /// The backend rejected the submission or was unreachable
    #[error(transparent)]
    Backend(#[from] ClientApiError),

    /// The backend accepted the submission but returned no identifier
    #[error("Backend did not return an investigation id")]
    MissingInvestigationId,
}

impl SubmitError {
    /// Whether the failure happened before any request was sent
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
