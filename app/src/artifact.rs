//! Artifacts produced by the generation flows: the diagram script recovered
//! from a reply, the rendered vector image, and the structured alert report.

use serde::Deserialize;
use std::fmt;

/// Diagram-language source recovered from a fenced block in a model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramScript {
    pub source: String,
}

/// Standalone vector markup for one rendered diagram.
///
/// Owned by the flow slot for the duration of one render-and-export cycle;
/// replaced wholesale by the next generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub vector_markup: String,
}

/// Risk tier assigned by the analyst model. Wire values are the exact strings
/// `High`, `Medium` and `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        };
        f.write_str(name)
    }
}

/// Structured report for one security alert, parsed from a
/// schema-constrained reply. Every field is required.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AlertDetail {
    /// The user associated with the event.
    pub user: String,
    /// A concise description of the detected action.
    pub action: String,
    /// The most relevant CWE number, or `N/A`.
    pub cwe: String,
    pub risk: RiskLevel,
    /// Why this event is a potential risk.
    pub details: String,
    /// Actionable steps for the security team, in markdown.
    pub recommendation: String,
}
