// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Terminal rendering of investigation state

use oc_api_contract::{DecodedDiagnostic, InvestigationSummary};
use oc_core::{InvestigationLifecycle, InvestigationPhase};

pub fn phase_label(phase: InvestigationPhase) -> &'static str {
    match phase {
        InvestigationPhase::Idle => "idle",
        InvestigationPhase::Loading => "loading",
        InvestigationPhase::Pending => "pending",
        InvestigationPhase::Investigating => "investigating",
        InvestigationPhase::Completed => "completed",
        InvestigationPhase::Failed => "failed",
    }
}

/// One status line per published lifecycle update
pub fn render_progress(lifecycle: &InvestigationLifecycle) -> String {
    let id = lifecycle.id().unwrap_or_default();
    let mut line = format!("investigation {}: {}", id, phase_label(lifecycle.phase()));
    if lifecycle.last_fetch_failed() {
        line.push_str(" (last status check failed, retrying)");
    }
    line
}

/// Multi-line report for a finished investigation.
///
/// Sections with no content are omitted rather than printed empty.
pub fn render_diagnostic(diagnostic: &DecodedDiagnostic) -> String {
    if diagnostic.is_empty() {
        return "No diagnostic details were produced.".to_string();
    }

    let mut out = String::new();
    if let Some(root_cause) = &diagnostic.root_cause {
        out.push_str("Root cause:\n");
        out.push_str(&indent(root_cause));
    }
    if let Some(code) = &diagnostic.problematic_code {
        out.push_str("Problematic code:\n");
        out.push_str(&indent(code));
    }
    if let Some(fix) = &diagnostic.suggested_fix {
        out.push_str("Suggested fix:\n");
        out.push_str(&indent(fix));
    }
    if let Some(action) = &diagnostic.action {
        out.push_str(&format!("Recommended action: {}\n", action.as_str()));
    }
    if let Some(confidence) = diagnostic.confidence {
        out.push_str(&format!("Confidence: {}\n", confidence.as_str()));
    }
    out
}

pub fn render_summary_row(summary: &InvestigationSummary) -> String {
    let created = summary
        .created_at
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:>6}  {:<13} {:<17} {}",
        summary.id,
        summary.status.to_string(),
        created,
        truncate(&summary.error_message, 60)
    )
}

fn indent(text: &str) -> String {
    let mut out = String::new();
    for line in text.lines() {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{cut}\u{2026}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use oc_api_contract::{Confidence, RecommendedAction};

    #[test]
    fn empty_diagnostic_renders_placeholder() {
        let rendered = render_diagnostic(&DecodedDiagnostic::default());
        assert!(rendered.contains("No diagnostic details"));
    }

    #[test]
    fn populated_sections_appear_in_order() {
        let diagnostic = DecodedDiagnostic {
            root_cause: Some("missing env var".to_string()),
            problematic_code: None,
            suggested_fix: Some("set DATABASE_URL".to_string()),
            action: Some(RecommendedAction::Patch),
            confidence: Some(Confidence::High),
        };
        let rendered = render_diagnostic(&diagnostic);

        let root = rendered.find("Root cause:").unwrap();
        let fix = rendered.find("Suggested fix:").unwrap();
        assert!(root < fix);
        assert!(!rendered.contains("Problematic code:"));
        assert!(rendered.contains("Recommended action: patch"));
        assert!(rendered.contains("Confidence: high"));
    }

    #[test]
    fn long_error_messages_are_truncated() {
        let long = "x".repeat(100);
        let truncated = truncate(&long, 60);
        assert!(truncated.chars().count() <= 60);
        assert!(truncated.ends_with('\u{2026}'));
    }
}
