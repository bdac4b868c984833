// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for the REST client

use oc_client_api::ClientApiError;
use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced by REST client operations
#[derive(Debug, Error)]
pub enum RestClientError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error {status}: {detail}")]
    Server { status: StatusCode, detail: String },
}

pub type RestClientResult<T> = Result<T, RestClientError>;

impl From<RestClientError> for ClientApiError {
    fn from(err: RestClientError) -> Self {
        match err {
            RestClientError::Server { status, detail } => ClientApiError::Server {
                status: status.as_u16(),
                detail,
            },
            RestClientError::Http(e) => ClientApiError::Transport(e.to_string()),
            RestClientError::Url(e) => ClientApiError::Transport(e.to_string()),
            RestClientError::Json(e) => ClientApiError::Contract(e.to_string()),
        }
    }
}
