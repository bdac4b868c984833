// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Main REST API client implementation

use oc_api_contract::*;
use reqwest::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{RestClientError, RestClientResult};

/// REST API client for the on-call agent service
#[derive(Debug, Clone)]
pub struct RestClient {
    http_client: HttpClient,
    base_url: Url,
}

impl RestClient {
    /// Create a new REST client for the given backend base URL
    pub fn new(base_url: Url) -> RestClientResult<Self> {
        let http_client = HttpClient::builder().user_agent("oncall-console/0.1").build()?;
        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Create a client from a base URL string
    pub fn from_url(base_url: &str) -> RestClientResult<Self> {
        let base_url = Url::parse(base_url)?;
        Self::new(base_url)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// List registered repositories
    pub async fn list_repositories(&self) -> RestClientResult<Vec<Repository>> {
        self.get("/api/repositories").await
    }

    /// Register a repository. The backend creates it or returns the
    /// existing registration for the same owner/name pair.
    pub async fn create_repository(
        &self,
        request: &CreateRepositoryRequest,
    ) -> RestClientResult<Repository> {
        let mut form = vec![
            ("owner", request.owner.clone()),
            ("name", request.name.clone()),
            ("default_branch", request.default_branch.clone()),
        ];
        if let Some(project) = &request.railway_project_name {
            form.push(("railway_project_name", project.clone()));
        }

        let url = self.base_url.join("/api/repositories")?;
        let response = self.http_client.post(url).form(&form).send().await?;
        self.handle_response(response).await
    }

    /// Get a single repository
    pub async fn get_repository(&self, repository_id: i64) -> RestClientResult<Repository> {
        self.get(&format!("/api/repositories/{}", repository_id)).await
    }

    /// Upload a documentation file for a repository
    pub async fn upload_document(
        &self,
        repository_id: i64,
        filename: &str,
        content: Vec<u8>,
    ) -> RestClientResult<DocumentUpload> {
        let part = reqwest::multipart::Part::bytes(content).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = self.base_url.join(&format!("/api/repositories/{}/documents", repository_id))?;
        let response = self.http_client.post(url).multipart(form).send().await?;
        self.handle_response(response).await
    }

    /// List documents uploaded for a repository
    pub async fn list_documents(
        &self,
        repository_id: i64,
    ) -> RestClientResult<Vec<DocumentUpload>> {
        self.get(&format!("/api/repositories/{}/documents", repository_id)).await
    }

    /// Start an investigation for an error report.
    ///
    /// Optional fields are sent as empty strings; the backend accepts
    /// the form either way.
    pub async fn start_investigation(
        &self,
        request: &InvestigationRequest,
    ) -> RestClientResult<StartInvestigationResponse> {
        let form = [
            ("error_message", request.error_message.as_str()),
            ("deployment_logs", request.deployment_logs.as_deref().unwrap_or("")),
            ("commit_sha", request.commit_sha.as_deref().unwrap_or("")),
        ];

        let url = self
            .base_url
            .join(&format!("/api/repositories/{}/investigate", request.repository_id))?;
        let response = self.http_client.post(url).form(&form).send().await?;
        self.handle_response(response).await
    }

    /// List recent investigations
    pub async fn list_investigations(&self) -> RestClientResult<Vec<InvestigationSummary>> {
        self.get("/api/investigations").await
    }

    /// Get the current snapshot of one investigation
    pub async fn get_investigation(
        &self,
        investigation_id: i64,
    ) -> RestClientResult<Investigation> {
        self.get(&format!("/api/investigations/{}", investigation_id)).await
    }

    // Private helper methods

    async fn get<T: DeserializeOwned>(&self, path: &str) -> RestClientResult<T> {
        let url = self.base_url.join(path)?;
        let response = self.http_client.get(url).send().await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> RestClientResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            serde_json::from_str(&text).map_err(RestClientError::from)
        } else {
            tracing::debug!(%status, "backend returned non-success response");
            Err(RestClientError::Server {
                status,
                detail: error_detail(status.as_u16(), &text),
            })
        }
    }
}

/// Extract the backend's `detail` message from an error body, falling
/// back to a generic status-code message.
fn error_detail(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.detail)
        .unwrap_or_else(|_| format!("HTTP error! status: {}", status))
}
