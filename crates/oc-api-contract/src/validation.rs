//! Validation helpers for API contract types

use crate::error::ApiContractError;
use crate::types::*;
use validator::Validate;

/// Validate an investigation request before submission.
///
/// A whitespace-only error message is rejected in addition to the
/// derive-level length check: the backend treats blank messages as
/// missing, so they must never reach the wire.
pub fn validate_investigation_request(
    request: &InvestigationRequest,
) -> Result<(), ApiContractError> {
    request.validate()?;

    if request.error_message.trim().is_empty() {
        let mut errors = validator::ValidationErrors::new();
        errors.add(
            "error_message",
            validator::ValidationError::new("blank").with_message("Error message cannot be blank".into()),
        );
        return Err(ApiContractError::Validation(errors));
    }

    Ok(())
}

/// Validate a repository registration request
pub fn validate_create_repository_request(
    request: &CreateRepositoryRequest,
) -> Result<(), ApiContractError> {
    request.validate()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> InvestigationRequest {
        InvestigationRequest::new(3, "Deployment failed: cannot read property 'create'")
            .with_deployment_logs("=== build log ===")
            .with_commit_sha("7a3f8e2")
    }

    #[test]
    fn valid_request_passes() {
        assert!(validate_investigation_request(&valid_request()).is_ok());
    }

    #[test]
    fn empty_error_message_is_rejected() {
        let mut request = valid_request();
        request.error_message = String::new();
        assert!(validate_investigation_request(&request).is_err());
    }

    #[test]
    fn blank_error_message_is_rejected() {
        let mut request = valid_request();
        request.error_message = "   \n".to_string();
        assert!(validate_investigation_request(&request).is_err());
    }

    #[test]
    fn non_positive_repository_id_is_rejected() {
        let mut request = valid_request();
        request.repository_id = 0;
        assert!(validate_investigation_request(&request).is_err());
    }

    #[test]
    fn repository_request_requires_owner_and_name() {
        let request = CreateRepositoryRequest {
            owner: String::new(),
            name: "api".to_string(),
            default_branch: "main".to_string(),
            railway_project_name: None,
        };
        assert!(validate_create_repository_request(&request).is_err());

        let request = CreateRepositoryRequest {
            owner: "acme".to_string(),
            name: "api".to_string(),
            default_branch: "main".to_string(),
            railway_project_name: Some("acme-api".to_string()),
        };
        assert!(validate_create_repository_request(&request).is_ok());
    }

    #[test]
    fn serialization_roundtrip_investigation_request() {
        let original = valid_request();
        let json = serde_json::to_string(&original).unwrap();
        let deserialized: InvestigationRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(original, deserialized);
    }
}
