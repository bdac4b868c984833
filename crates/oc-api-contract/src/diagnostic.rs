//! Tolerant decoding of diagnostic payloads
//!
//! Completed investigations carry a semi-structured diagnostic string:
//! usually a JSON object with known keys, sometimes free prose from the
//! analysis model. Decoding must never fail; unstructured input becomes
//! the narrative root cause and nothing else.

use serde::Deserialize;

/// Action the backend recommends taking for the incident
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendedAction {
    Revert,
    Patch,
    /// Anything else the backend emits, kept verbatim
    Other(String),
}

impl RecommendedAction {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "revert" => Self::Revert,
            "patch" => Self::Patch,
            _ => Self::Other(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Revert => "revert",
            Self::Patch => "patch",
            Self::Other(s) => s,
        }
    }
}

/// Backend confidence in the reported root cause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Unknown values are dropped rather than rejected
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Typed sections of a diagnostic payload, all optional
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedDiagnostic {
    pub root_cause: Option<String>,
    pub problematic_code: Option<String>,
    pub suggested_fix: Option<String>,
    pub action: Option<RecommendedAction>,
    pub confidence: Option<Confidence>,
}

impl DecodedDiagnostic {
    pub fn is_empty(&self) -> bool {
        self.root_cause.is_none()
            && self.problematic_code.is_none()
            && self.suggested_fix.is_none()
            && self.action.is_none()
            && self.confidence.is_none()
    }
}

// Recognized keys of the structured form. Unknown keys are ignored by
// serde's default behavior, which is exactly the contract.
#[derive(Deserialize)]
struct StructuredFields {
    root_cause: Option<String>,
    problematic_code: Option<String>,
    suggested_fix: Option<String>,
    action: Option<String>,
    confidence: Option<String>,
}

/// Result of attempting a structured parse of a raw diagnostic string
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticPayload {
    /// The payload was a JSON object; recognized fields were extracted
    Structured(DecodedDiagnostic),
    /// The payload was prose (or malformed JSON) and is kept verbatim
    Raw(String),
}

impl DiagnosticPayload {
    /// Classify a raw payload. Parse failure is a normal branch, not an
    /// error: anything that is not a JSON object comes back as `Raw`.
    pub fn parse(raw: &str) -> Self {
        // serde's derived struct deserializer also accepts sequences;
        // only an actual JSON object counts as structured.
        let value = match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(value @ serde_json::Value::Object(_)) => value,
            _ => return Self::Raw(raw.to_string()),
        };
        match serde_json::from_value::<StructuredFields>(value) {
            Ok(fields) => Self::Structured(DecodedDiagnostic {
                root_cause: fields.root_cause,
                problematic_code: fields.problematic_code,
                suggested_fix: fields.suggested_fix,
                action: fields.action.as_deref().map(RecommendedAction::parse),
                confidence: fields.confidence.as_deref().and_then(Confidence::parse),
            }),
            Err(_) => Self::Raw(raw.to_string()),
        }
    }

    pub fn into_decoded(self) -> DecodedDiagnostic {
        match self {
            Self::Structured(decoded) => decoded,
            Self::Raw(text) => DecodedDiagnostic {
                root_cause: Some(text),
                ..DecodedDiagnostic::default()
            },
        }
    }

    /// Decode an optional raw payload into renderable sections.
    ///
    /// Missing or blank input yields an empty result so callers can
    /// render a clean "no data yet" state. Pure and deterministic; safe
    /// to call on every render.
    pub fn decode(raw: Option<&str>) -> DecodedDiagnostic {
        match raw {
            None => DecodedDiagnostic::default(),
            Some(s) if s.trim().is_empty() => DecodedDiagnostic::default(),
            Some(s) => Self::parse(s).into_decoded(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_payload_extracts_recognized_fields() {
        let raw = r#"{
            "root_cause": "Null pointer in payment handler",
            "problematic_code": "order.create()",
            "suggested_fix": "guard against missing order",
            "action": "patch",
            "confidence": "high"
        }"#;
        let decoded = DiagnosticPayload::decode(Some(raw));
        assert_eq!(
            decoded.root_cause.as_deref(),
            Some("Null pointer in payment handler")
        );
        assert_eq!(decoded.problematic_code.as_deref(), Some("order.create()"));
        assert_eq!(decoded.suggested_fix.as_deref(), Some("guard against missing order"));
        assert_eq!(decoded.action, Some(RecommendedAction::Patch));
        assert_eq!(decoded.confidence, Some(Confidence::High));
    }

    #[test]
    fn unrecognized_keys_are_dropped_without_error() {
        let raw = r#"{"root_cause": "bad deploy", "severity": "P1", "extra": [1, 2]}"#;
        let decoded = DiagnosticPayload::decode(Some(raw));
        assert_eq!(decoded.root_cause.as_deref(), Some("bad deploy"));
        assert!(decoded.problematic_code.is_none());
        assert!(decoded.action.is_none());
    }

    #[test]
    fn prose_falls_back_to_narrative_only() {
        let raw = "The deploy failed because the migration never ran.";
        match DiagnosticPayload::parse(raw) {
            DiagnosticPayload::Raw(text) => assert_eq!(text, raw),
            other => panic!("expected Raw, got {:?}", other),
        }
        let decoded = DiagnosticPayload::decode(Some(raw));
        assert_eq!(decoded.root_cause.as_deref(), Some(raw));
        assert!(decoded.suggested_fix.is_none());
        assert!(decoded.confidence.is_none());
    }

    #[test]
    fn malformed_json_is_treated_as_prose() {
        let raw = r#"{"root_cause": "unterminated"#;
        let decoded = DiagnosticPayload::decode(Some(raw));
        assert_eq!(decoded.root_cause.as_deref(), Some(raw));
        assert!(decoded.problematic_code.is_none());
    }

    #[test]
    fn non_object_json_is_treated_as_prose() {
        for raw in [r#""just a string""#, "42", "[1, 2, 3]", "null"] {
            let decoded = DiagnosticPayload::decode(Some(raw));
            assert_eq!(decoded.root_cause.as_deref(), Some(raw), "input: {raw}");
        }
    }

    #[test]
    fn json_string_array_is_treated_as_prose() {
        // A sequence of strings would fill the struct fields
        // positionally if the parse were not gated on an object.
        let raw = r#"["a", "b", "c", "d", "e"]"#;
        match DiagnosticPayload::parse(raw) {
            DiagnosticPayload::Raw(text) => assert_eq!(text, raw),
            other => panic!("expected Raw, got {:?}", other),
        }
        let decoded = DiagnosticPayload::decode(Some(raw));
        assert_eq!(decoded.root_cause.as_deref(), Some(raw));
        assert!(decoded.problematic_code.is_none());
        assert!(decoded.suggested_fix.is_none());
        assert!(decoded.action.is_none());
    }

    #[test]
    fn empty_and_missing_input_decode_to_empty() {
        assert!(DiagnosticPayload::decode(None).is_empty());
        assert!(DiagnosticPayload::decode(Some("")).is_empty());
        assert!(DiagnosticPayload::decode(Some("   \n\t")).is_empty());
    }

    #[test]
    fn unknown_action_is_kept_verbatim() {
        let raw = r#"{"action": "rollback-and-page"}"#;
        let decoded = DiagnosticPayload::decode(Some(raw));
        assert_eq!(
            decoded.action,
            Some(RecommendedAction::Other("rollback-and-page".to_string()))
        );
    }

    #[test]
    fn unknown_confidence_is_dropped() {
        let raw = r#"{"root_cause": "x", "confidence": "absolute"}"#;
        let decoded = DiagnosticPayload::decode(Some(raw));
        assert_eq!(decoded.confidence, None);
        assert_eq!(decoded.root_cause.as_deref(), Some("x"));
    }

    #[test]
    fn action_parsing_is_case_insensitive() {
        assert_eq!(RecommendedAction::parse("REVERT"), RecommendedAction::Revert);
        assert_eq!(RecommendedAction::parse(" Patch "), RecommendedAction::Patch);
    }
}
