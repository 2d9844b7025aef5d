use crate::diagram::RenderError;
use crate::extract::ExtractError;
use accuchart_sdk::GenerationError;
use thiserror::Error;

/// Failure taxonomy for one generation flow. Every variant is terminal for
/// the current run; the slot is left empty and the same action can be retried
/// from scratch.
#[derive(Error, Debug)]
pub enum FlowError {
    /// Rejected locally before any request was sent.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The service call itself failed.
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),
    /// The service replied, but the reply held no usable artifact.
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractError),
    /// The generated diagram script was rejected by the renderer.
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
    /// Nothing to export yet; a warning for the caller, not a fault.
    #[error("nothing to export: {0}")]
    ExportPrecondition(&'static str),
    /// Writing the exported file failed.
    #[error("export failed: {0}")]
    Io(#[from] std::io::Error),
}
