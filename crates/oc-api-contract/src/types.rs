//! API contract types for the on-call agent REST service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Investigation lifecycle states as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestigationStatus {
    Pending,
    Investigating,
    Completed,
    Failed,
}

impl InvestigationStatus {
    /// Terminal statuses never transition further
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl std::fmt::Display for InvestigationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Investigating => "investigating",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Repository registered with the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: i64,
    pub owner: String,
    pub name: String,
    pub default_branch: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub railway_project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Repository {
    /// `owner/name` as shown to operators
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Repository registration request (submitted as form fields)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CreateRepositoryRequest {
    #[validate(length(min = 1, message = "Owner cannot be empty"))]
    pub owner: String,
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,
    #[serde(default = "default_branch")]
    pub default_branch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub railway_project_name: Option<String>,
}

fn default_branch() -> String {
    "main".to_string()
}

/// Error report submitted to start an investigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct InvestigationRequest {
    #[validate(range(min = 1, message = "Repository id must be positive"))]
    pub repository_id: i64,
    #[validate(length(min = 1, message = "Error message cannot be empty"))]
    pub error_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_logs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_sha: Option<String>,
}

impl InvestigationRequest {
    pub fn new(repository_id: i64, error_message: impl Into<String>) -> Self {
        Self {
            repository_id,
            error_message: error_message.into(),
            deployment_logs: None,
            commit_sha: None,
        }
    }

    pub fn with_deployment_logs(mut self, logs: impl Into<String>) -> Self {
        self.deployment_logs = Some(logs.into());
        self
    }

    pub fn with_commit_sha(mut self, sha: impl Into<String>) -> Self {
        self.commit_sha = Some(sha.into());
        self
    }
}

/// Point-in-time snapshot of an investigation (detail endpoint)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investigation {
    pub id: i64,
    pub status: InvestigationStatus,
    pub error_message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub root_cause: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub suggested_fix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Investigation {
    /// The raw diagnostic payload produced by analysis, if any.
    ///
    /// `root_cause` is preferred; older backends populated only
    /// `suggested_fix` on partial completion.
    pub fn diagnostic_payload(&self) -> Option<&str> {
        self.root_cause
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.suggested_fix.as_deref().filter(|s| !s.trim().is_empty()))
    }
}

/// Reduced investigation shape returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestigationSummary {
    pub id: i64,
    pub status: InvestigationStatus,
    pub error_message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub repository_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Response to `POST /api/repositories/{id}/investigate`
///
/// `investigation_id` is optional only at the serde layer; a response
/// without it is a contract violation surfaced by the submission flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartInvestigationResponse {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub investigation_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<InvestigationStatus>,
}

/// Acknowledgement for a document upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentUpload {
    pub id: i64,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub file_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_terminality() {
        assert!(!InvestigationStatus::Pending.is_terminal());
        assert!(!InvestigationStatus::Investigating.is_terminal());
        assert!(InvestigationStatus::Completed.is_terminal());
        assert!(InvestigationStatus::Failed.is_terminal());
    }

    #[test]
    fn status_wire_format_is_lowercase() {
        let json = serde_json::to_string(&InvestigationStatus::Investigating).unwrap();
        assert_eq!(json, "\"investigating\"");
        let parsed: InvestigationStatus = serde_json::from_str("\"failed\"").unwrap();
        assert_eq!(parsed, InvestigationStatus::Failed);
    }

    #[test]
    fn investigation_snapshot_deserializes_backend_shape() {
        let body = r#"{
            "id": 7,
            "status": "completed",
            "error_message": "Deployment failed",
            "root_cause": "{\"root_cause\": \"missing env var\"}",
            "suggested_fix": "set DATABASE_URL",
            "created_at": "2025-01-15T10:00:00Z",
            "completed_at": "2025-01-15T10:02:30Z"
        }"#;
        let inv: Investigation = serde_json::from_str(body).unwrap();
        assert_eq!(inv.id, 7);
        assert_eq!(inv.status, InvestigationStatus::Completed);
        assert!(inv.completed_at.is_some());
    }

    #[test]
    fn diagnostic_payload_prefers_root_cause() {
        let mut inv = Investigation {
            id: 1,
            status: InvestigationStatus::Completed,
            error_message: "boom".into(),
            root_cause: Some("analysis".into()),
            suggested_fix: Some("placeholder".into()),
            created_at: None,
            completed_at: None,
        };
        assert_eq!(inv.diagnostic_payload(), Some("analysis"));

        inv.root_cause = Some("   ".into());
        assert_eq!(inv.diagnostic_payload(), Some("placeholder"));

        inv.suggested_fix = None;
        assert_eq!(inv.diagnostic_payload(), None);
    }

    #[test]
    fn start_response_tolerates_missing_id() {
        let resp: StartInvestigationResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.investigation_id, None);

        let resp: StartInvestigationResponse =
            serde_json::from_str(r#"{"investigation_id": 42, "status": "investigating"}"#).unwrap();
        assert_eq!(resp.investigation_id, Some(42));
    }
}
