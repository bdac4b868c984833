// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! REST API client for the on-call agent service
//!
//! This crate provides the production HTTP client for the investigation
//! backend. It is intentionally thin: typed endpoint methods, form and
//! multipart encoding, and error-detail extraction. Lifecycle logic
//! (polling, state machine, submission validation) lives in `oc-core`,
//! which consumes this client through the `ClientApi` trait.

pub mod client;
pub mod error;
pub mod network_config;

pub use client::*;
pub use error::*;
pub use network_config::*;

use async_trait::async_trait;
use oc_api_contract::*;
use oc_client_api::{ClientApi, ClientApiResult};

#[async_trait]
impl ClientApi for client::RestClient {
    async fn list_repositories(&self) -> ClientApiResult<Vec<Repository>> {
        self.list_repositories().await.map_err(Into::into)
    }

    async fn create_repository(
        &self,
        request: &CreateRepositoryRequest,
    ) -> ClientApiResult<Repository> {
        self.create_repository(request).await.map_err(Into::into)
    }

    async fn get_repository(&self, repository_id: i64) -> ClientApiResult<Repository> {
        self.get_repository(repository_id).await.map_err(Into::into)
    }

    async fn upload_document(
        &self,
        repository_id: i64,
        filename: &str,
        content: Vec<u8>,
    ) -> ClientApiResult<DocumentUpload> {
        self.upload_document(repository_id, filename, content).await.map_err(Into::into)
    }

    async fn list_documents(&self, repository_id: i64) -> ClientApiResult<Vec<DocumentUpload>> {
        self.list_documents(repository_id).await.map_err(Into::into)
    }

    async fn start_investigation(
        &self,
        request: &InvestigationRequest,
    ) -> ClientApiResult<StartInvestigationResponse> {
        self.start_investigation(request).await.map_err(Into::into)
    }

    async fn list_investigations(&self) -> ClientApiResult<Vec<InvestigationSummary>> {
        self.list_investigations().await.map_err(Into::into)
    }

    async fn get_investigation(&self, investigation_id: i64) -> ClientApiResult<Investigation> {
        self.get_investigation(investigation_id).await.map_err(Into::into)
    }
}
