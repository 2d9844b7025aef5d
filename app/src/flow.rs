//! One complete validate → request → extract → (render) → ready cycle per
//! user action.
//!
//! Each flow owns exactly one [`FlowSlot`]; the `&mut` borrow keeps slot
//! access sequential, and whichever run completes last owns the slot — the
//! accepted last-writer-wins behavior for overlapping triggers. There is no
//! cancellation: an abandoned run simply finishes and is overwritten.

use crate::artifact::{AlertDetail, RenderedImage};
use crate::diagram::DiagramRenderer;
use crate::{export, extract, prompt, FlowError};
use accuchart_sdk::{GenerationRequest, Generator};
use std::path::Path;
use tracing::{debug, warn};

/// Where a flow currently stands. `Ready` and `Failed` both permit starting
/// a fresh run, which discards any prior artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowStatus {
    #[default]
    Idle,
    Requesting,
    Extracting,
    Rendering,
    Ready,
    Failed,
}

/// Per-flow state: the status and the single current-artifact slot. No
/// history is kept; starting a run clears the previous artifact before
/// anything is requested.
#[derive(Debug)]
pub struct FlowSlot<A> {
    status: FlowStatus,
    artifact: Option<A>,
}

impl<A> Default for FlowSlot<A> {
    fn default() -> Self {
        Self {
            status: FlowStatus::Idle,
            artifact: None,
        }
    }
}

impl<A> FlowSlot<A> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn status(&self) -> FlowStatus {
        self.status
    }

    /// The most recently produced artifact, if the last run succeeded.
    #[must_use]
    pub fn artifact(&self) -> Option<&A> {
        self.artifact.as_ref()
    }

    fn begin(&mut self) {
        self.artifact = None;
        self.status = FlowStatus::Requesting;
    }

    fn advance(&mut self, status: FlowStatus) {
        self.status = status;
    }

    fn finish(&mut self, result: Result<A, FlowError>) -> Result<(), FlowError> {
        match result {
            Ok(artifact) => {
                self.artifact = Some(artifact);
                self.status = FlowStatus::Ready;
                Ok(())
            }
            Err(error) => {
                self.artifact = None;
                self.status = FlowStatus::Failed;
                warn!(%error, "flow failed");
                Err(error)
            }
        }
    }
}

/// Text in, rendered flowchart out.
pub async fn generate_chart(
    generator: &dyn Generator,
    renderer: &DiagramRenderer,
    slot: &mut FlowSlot<RenderedImage>,
    input_text: &str,
) -> Result<(), FlowError> {
    let request = prompt::text_to_diagram(input_text)?;
    slot.begin();
    let result = chart_pipeline(generator, renderer, slot, request).await;
    slot.finish(result)
}

async fn chart_pipeline(
    generator: &dyn Generator,
    renderer: &DiagramRenderer,
    slot: &mut FlowSlot<RenderedImage>,
    request: GenerationRequest,
) -> Result<RenderedImage, FlowError> {
    let response = generator.generate(request).await?;
    slot.advance(FlowStatus::Extracting);
    let script = extract::diagram_script(&response.text)?;
    debug!(lines = script.source.lines().count(), "extracted diagram script");
    slot.advance(FlowStatus::Rendering);
    Ok(renderer.render(&script)?)
}

/// Chart image in, structured document text out. The reply is used verbatim.
pub async fn generate_document(
    generator: &dyn Generator,
    slot: &mut FlowSlot<String>,
    image_data: Vec<u8>,
    mime_type: &str,
) -> Result<(), FlowError> {
    let request = prompt::image_to_document(image_data, mime_type)?;
    slot.begin();
    let result = async {
        let response = generator.generate(request).await?;
        slot.advance(FlowStatus::Extracting);
        Ok(response.text)
    }
    .await;
    slot.finish(result)
}

/// Alert summary in, structured report out.
pub async fn generate_alert_detail(
    generator: &dyn Generator,
    slot: &mut FlowSlot<AlertDetail>,
    alert_summary: &str,
) -> Result<(), FlowError> {
    let request = prompt::alert_detail(alert_summary)?;
    slot.begin();
    let result = async {
        let response = generator.generate(request).await?;
        slot.advance(FlowStatus::Extracting);
        Ok(extract::alert_detail(&response.text)?)
    }
    .await;
    slot.finish(result)
}

/// Export the current chart; refuses when no chart has been rendered.
pub fn export_chart(slot: &FlowSlot<RenderedImage>, path: &Path) -> Result<(), FlowError> {
    let image = slot
        .artifact()
        .ok_or(FlowError::ExportPrecondition("no chart has been rendered"))?;
    export::export_svg(image, path)?;
    Ok(())
}

/// Export the current document; refuses when no document has been generated.
pub fn export_document(slot: &FlowSlot<String>, path: &Path) -> Result<(), FlowError> {
    let body = slot.artifact().ok_or(FlowError::ExportPrecondition(
        "no document has been generated",
    ))?;
    export::export_text(body, path)?;
    Ok(())
}
