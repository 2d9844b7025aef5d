pub mod artifact;
pub mod diagram;
mod errors;
pub mod export;
pub mod extract;
pub mod flow;
pub mod prompt;

pub use artifact::{AlertDetail, DiagramScript, RenderedImage, RiskLevel};
pub use diagram::{DiagramRenderer, RenderError, Theme};
pub use errors::FlowError;
pub use extract::ExtractError;
pub use flow::{FlowSlot, FlowStatus};
