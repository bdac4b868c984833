// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for API contract validation

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during API contract validation
#[derive(Debug, Error)]
pub enum ApiContractError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Error body returned by the backend on non-success responses.
///
/// The backend reports failures as `{ "detail": "..." }`; everything
/// else in the body is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_parses_backend_detail() {
        let body = r#"{"detail": "Repository not found"}"#;
        let err: ErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(err.detail, "Repository not found");
    }

    #[test]
    fn error_response_rejects_bodies_without_detail() {
        assert!(serde_json::from_str::<ErrorResponse>(r#"{"message": "nope"}"#).is_err());
    }
}
