//! In-process renderer for the flowchart scripts the diagram flow extracts:
//! parse, place, emit SVG. A syntactically invalid script fails as a whole;
//! no partial markup is ever produced.

mod layout;
mod parser;
mod svg;
mod theme;

use crate::artifact::{DiagramScript, RenderedImage};
use thiserror::Error;

pub use theme::{ClassStyle, Theme};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("diagram script is empty")]
    Empty,
    #[error("expected a `flowchart` header, found `{0}`")]
    MissingHeader(String),
    #[error("unsupported flow direction `{0}`")]
    Direction(String),
    #[error("line {line}: unrecognized statement `{text}`")]
    Statement { line: usize, text: String },
}

/// Renders diagram scripts with a visual theme fixed at construction.
pub struct DiagramRenderer {
    theme: Theme,
}

impl DiagramRenderer {
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn render(&self, script: &DiagramScript) -> Result<RenderedImage, RenderError> {
        let graph = parser::parse(&script.source)?;
        let placed = layout::layout(&graph);
        Ok(RenderedImage {
            vector_markup: svg::render_svg(&graph, &placed, &self.theme),
        })
    }
}

impl Default for DiagramRenderer {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_valid_script_to_vector_markup() {
        let renderer = DiagramRenderer::default();
        let script = DiagramScript {
            source: "flowchart TD\nA((\"팀장\"))\nclass A high-importance".to_string(),
        };
        let image = renderer.render(&script).unwrap();
        assert!(image.vector_markup.contains("<circle"));
        assert!(image.vector_markup.contains("팀장"));
        assert!(image.vector_markup.contains("stroke=\"#C62828\""));
    }

    #[test]
    fn invalid_script_fails_without_output() {
        let renderer = DiagramRenderer::default();
        let script = DiagramScript {
            source: "sequenceDiagram\nA->>B: hi".to_string(),
        };
        assert!(renderer.render(&script).is_err());
    }
}
