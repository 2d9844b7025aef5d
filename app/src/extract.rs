//! Pulls the expected artifact out of a raw model reply.
//!
//! The fenced-block scrape is a best-effort parse: the first ```mermaid block
//! wins and later blocks are ignored. Absence of a match is terminal for the
//! flow, never a partial result.

use crate::artifact::{AlertDetail, DiagramScript};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static MERMAID_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```mermaid\n(.*?)\n```").expect("fence pattern is valid")
});

#[derive(Error, Debug)]
pub enum ExtractError {
    /// The reply contained no ```mermaid fenced block.
    #[error("no fenced mermaid block in the model reply")]
    NoDiagramBlock,
    /// The reply was not valid JSON for the declared schema.
    #[error("structured reply did not match the alert schema: {0}")]
    MalformedRecord(#[from] serde_json::Error),
}

/// Recover the diagram script from the first fenced mermaid block, trimmed of
/// surrounding whitespace.
pub fn diagram_script(raw_text: &str) -> Result<DiagramScript, ExtractError> {
    let captures = MERMAID_FENCE
        .captures(raw_text)
        .ok_or(ExtractError::NoDiagramBlock)?;
    Ok(DiagramScript {
        source: captures[1].trim().to_string(),
    })
}

/// Parse a schema-constrained reply into the alert report. Missing fields,
/// non-string fields and unknown risk levels all fail.
pub fn alert_detail(raw_text: &str) -> Result<AlertDetail, ExtractError> {
    Ok(serde_json::from_str(raw_text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::RiskLevel;

    #[test]
    fn recovers_the_fenced_block_interior_trimmed() {
        let raw = "Here is your chart:\n```mermaid\nflowchart TD\nA-->B\n```\nEnjoy!";
        let script = diagram_script(raw).unwrap();
        assert_eq!(script.source, "flowchart TD\nA-->B");
    }

    #[test]
    fn first_fenced_block_wins() {
        let raw = "```mermaid\nflowchart TD\nA-->B\n```\ntext\n```mermaid\nflowchart TD\nC-->D\n```";
        let script = diagram_script(raw).unwrap();
        assert_eq!(script.source, "flowchart TD\nA-->B");
    }

    #[test]
    fn reply_without_a_block_fails() {
        let raw = "Sorry, I can only describe the structure in prose.";
        assert!(matches!(
            diagram_script(raw),
            Err(ExtractError::NoDiagramBlock)
        ));
    }

    #[test]
    fn plain_code_fence_does_not_count() {
        let raw = "```\nflowchart TD\nA-->B\n```";
        assert!(matches!(
            diagram_script(raw),
            Err(ExtractError::NoDiagramBlock)
        ));
    }

    #[test]
    fn parses_a_complete_alert_record_preserving_risk_case() {
        let raw = r#"{
            "user": "jdoe",
            "action": "Bulk download of customer records",
            "cwe": "CWE-200",
            "risk": "High",
            "details": "Volume is far above the user's baseline.",
            "recommendation": "1. Suspend the session.\n2. Rotate credentials."
        }"#;
        let detail = alert_detail(raw).unwrap();
        assert_eq!(detail.risk, RiskLevel::High);
        assert_eq!(detail.risk.to_string(), "High");
        assert_eq!(detail.cwe, "CWE-200");
    }

    #[test]
    fn missing_action_field_fails() {
        let raw = r#"{
            "user": "jdoe",
            "cwe": "N/A",
            "risk": "Low",
            "details": "d",
            "recommendation": "r"
        }"#;
        assert!(matches!(
            alert_detail(raw),
            Err(ExtractError::MalformedRecord(_))
        ));
    }

    #[test]
    fn unknown_risk_level_fails() {
        let raw = r#"{
            "user": "jdoe",
            "action": "a",
            "cwe": "N/A",
            "risk": "Critical",
            "details": "d",
            "recommendation": "r"
        }"#;
        assert!(alert_detail(raw).is_err());
    }
}
