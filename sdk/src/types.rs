use crate::api::Schema;

/// The user action a request was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Free-form text in, accountability flowchart script out.
    DiagramFromText,
    /// Chart image in, structured accountability document out.
    DocumentFromImage,
    /// Security alert summary in, schema-constrained report out.
    AlertDetailFromSummary,
}

impl TaskKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DiagramFromText => "diagram_from_text",
            Self::DocumentFromImage => "document_from_image",
            Self::AlertDetailFromSummary => "alert_detail_from_summary",
        }
    }
}

/// Binary content sent alongside the prompt, e.g. an uploaded chart image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// IANA MIME type of `data`.
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// One fully assembled call to the generation service.
///
/// Built by a prompt builder and not modified afterwards. When
/// `response_schema` is set the service is asked for machine-readable JSON
/// conforming to the schema; otherwise the reply is free-form text.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub task_kind: TaskKind,
    pub prompt_text: String,
    pub attachment: Option<Attachment>,
    pub response_schema: Option<Schema>,
}

/// The raw textual reply from the service.
///
/// No structure is guaranteed until an extractor has run over `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelResponse {
    pub text: String,
}
