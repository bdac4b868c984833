// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Backend API trait for the on-call console
//!
//! The core lifecycle logic and the CLI program against this trait
//! rather than a concrete HTTP client, so tests can substitute a
//! scripted in-memory implementation. `oc-rest-client` provides the
//! production implementation.

use async_trait::async_trait;
use oc_api_contract::{
    CreateRepositoryRequest, DocumentUpload, Investigation, InvestigationRequest,
    InvestigationSummary, Repository, StartInvestigationResponse,
};
use thiserror::Error;

/// Errors surfaced by backend API calls
#[derive(Debug, Error)]
pub enum ClientApiError {
    /// Request never reached the service or the connection dropped
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("Server error {status}: {detail}")]
    Server { status: u16, detail: String },

    /// The service answered 2xx but the body violated the contract
    #[error("Unexpected response: {0}")]
    Contract(String),
}

impl ClientApiError {
    /// Human-readable detail for a non-success response, falling back
    /// to a generic status-code message when the body carried none.
    pub fn server(status: u16, detail: Option<String>) -> Self {
        Self::Server {
            status,
            detail: detail.unwrap_or_else(|| format!("HTTP error! status: {}", status)),
        }
    }
}

pub type ClientApiResult<T> = Result<T, ClientApiError>;

/// Operations the on-call backend exposes to clients
#[async_trait]
pub trait ClientApi: Send + Sync {
    /// List registered repositories
    async fn list_repositories(&self) -> ClientApiResult<Vec<Repository>>;

    /// Register a repository (or fetch the existing registration)
    async fn create_repository(
        &self,
        request: &CreateRepositoryRequest,
    ) -> ClientApiResult<Repository>;

    /// Fetch a single repository
    async fn get_repository(&self, repository_id: i64) -> ClientApiResult<Repository>;

    /// Upload a documentation file for a repository
    async fn upload_document(
        &self,
        repository_id: i64,
        filename: &str,
        content: Vec<u8>,
    ) -> ClientApiResult<DocumentUpload>;

    /// List documents uploaded for a repository
    async fn list_documents(&self, repository_id: i64) -> ClientApiResult<Vec<DocumentUpload>>;

    /// Start an investigation for an error report
    async fn start_investigation(
        &self,
        request: &InvestigationRequest,
    ) -> ClientApiResult<StartInvestigationResponse>;

    /// List recent investigations
    async fn list_investigations(&self) -> ClientApiResult<Vec<InvestigationSummary>>;

    /// Fetch the current snapshot of one investigation
    async fn get_investigation(&self, investigation_id: i64) -> ClientApiResult<Investigation>;
}
