//! Builds the fixed task templates around caller-supplied content.
//!
//! Callers are expected to pre-validate their input; an empty (trimmed) text
//! or an unsupported attachment is rejected here with `InvalidInput` before
//! any request is constructed.

use crate::FlowError;
use accuchart_sdk::{api::Schema, Attachment, GenerationRequest, TaskKind};

/// Image types the document flow accepts.
pub const SUPPORTED_IMAGE_TYPES: [&str; 2] = ["image/png", "image/jpeg"];

/// Build the text-to-flowchart request. The user text is embedded verbatim
/// between the template's document markers.
pub fn text_to_diagram(user_text: &str) -> Result<GenerationRequest, FlowError> {
    let trimmed = user_text.trim();
    if trimmed.is_empty() {
        return Err(FlowError::InvalidInput(
            "no text to analyze; provide a non-empty document".to_string(),
        ));
    }

    let prompt_text = format!(
        r#"You are an expert in corporate governance and organizational structure analysis.
Your task is to analyze the provided text and generate a Mermaid.js flowchart diagram script to visualize the accountability structure.
**Instructions:**
1.  The diagram must start with `flowchart TD`.
2.  Analyze the text to determine the importance of each role/task ('high', 'medium', 'low').
3.  Define 3 CSS classes for importance: `high-importance`, `medium-importance`, `low-importance`.
    - `high-importance`: `stroke-width:4px,stroke:#C62828,color:#000`
    - `medium-importance`: `stroke-width:2px,stroke:#FFA000,color:#000`
    - `low-importance`: `stroke-width:1px,stroke:#AAAAAA,fill:#f9f9f9,color:#000`
4.  All nodes MUST be circular, using the `id(("Label Text"))` syntax.
5.  Assign the appropriate importance class to each node using the `class` keyword.
6.  The output MUST be ONLY the Mermaid script enclosed in a markdown block: ```mermaid\n...\n```.

**Analyze the following document and generate the chart:**
---
{trimmed}
---
"#
    );

    Ok(GenerationRequest {
        task_kind: TaskKind::DiagramFromText,
        prompt_text,
        attachment: None,
        response_schema: None,
    })
}

/// Build the image-to-document request with the image attached inline.
pub fn image_to_document(
    image_data: Vec<u8>,
    mime_type: &str,
) -> Result<GenerationRequest, FlowError> {
    if !SUPPORTED_IMAGE_TYPES.contains(&mime_type) {
        return Err(FlowError::InvalidInput(format!(
            "unsupported image type `{mime_type}`; expected one of: {}",
            SUPPORTED_IMAGE_TYPES.join(", ")
        )));
    }
    if image_data.is_empty() {
        return Err(FlowError::InvalidInput(
            "image file is empty".to_string(),
        ));
    }

    let prompt_text = r###"You are a professional corporate consultant. Analyze the provided accountability structure chart image and generate a clear, structured "Accountability Structure Document" in Korean markdown format.

**Instructions:**
1.  Start with a title: "# 책무구조도 (Accountability Structure)".
2.  Create a brief summary of the overall structure shown in the chart.
3.  For each key role or department in the chart, create a section with a markdown heading (e.g., "## 역할: [Role Name]").
4.  Under each role, list its primary responsibilities as interpreted from the chart. If the chart provides limited detail, infer logical responsibilities based on the role's title and position.
5.  Describe the reporting lines shown in the chart.
6.  Maintain a formal and professional tone.
7.  The output must be only the markdown text. Do not add any other explanations.
"###
    .to_string();

    Ok(GenerationRequest {
        task_kind: TaskKind::DocumentFromImage,
        prompt_text,
        attachment: Some(Attachment {
            mime_type: mime_type.to_string(),
            data: image_data,
        }),
        response_schema: None,
    })
}

/// Build the alert-analysis request with the report schema attached, so the
/// service replies with machine-readable JSON.
pub fn alert_detail(alert_summary: &str) -> Result<GenerationRequest, FlowError> {
    let trimmed = alert_summary.trim();
    if trimmed.is_empty() {
        return Err(FlowError::InvalidInput(
            "alert summary is empty".to_string(),
        ));
    }

    let prompt_text = format!(
        "You are a cybersecurity analyst AI. Analyze the following security alert summary and provide a detailed report. Alert: \"{trimmed}\""
    );

    Ok(GenerationRequest {
        task_kind: TaskKind::AlertDetailFromSummary,
        prompt_text,
        attachment: None,
        response_schema: Some(alert_schema()),
    })
}

fn alert_schema() -> Schema {
    Schema::object([
        ("user", Schema::string("The user associated with the event.")),
        (
            "action",
            Schema::string("A concise description of the detected action."),
        ),
        (
            "cwe",
            Schema::string(
                "If applicable, the most relevant CWE (Common Weakness Enumeration) number. If not applicable, use \"N/A\".",
            ),
        ),
        (
            "risk",
            Schema::string("The risk level, one of \"High\", \"Medium\", or \"Low\"."),
        ),
        (
            "details",
            Schema::string("A brief explanation of why this event is a potential risk."),
        ),
        (
            "recommendation",
            Schema::string(
                "A clear, actionable, step-by-step recommendation for the security team to handle this alert. Use markdown for lists.",
            ),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagram_prompt_embeds_the_input_verbatim() {
        let input = "팀장은 예산을 승인한다";
        let request = text_to_diagram(input).unwrap();
        assert_eq!(request.task_kind, TaskKind::DiagramFromText);
        assert!(!request.prompt_text.is_empty());
        assert!(request.prompt_text.contains(input));
        assert!(request.attachment.is_none());
        assert!(request.response_schema.is_none());
    }

    #[test]
    fn whitespace_only_text_is_invalid() {
        assert!(matches!(
            text_to_diagram("   \n\t  "),
            Err(FlowError::InvalidInput(_))
        ));
    }

    #[test]
    fn document_prompt_carries_the_image_inline() {
        let request = image_to_document(vec![1, 2, 3], "image/png").unwrap();
        assert_eq!(request.task_kind, TaskKind::DocumentFromImage);
        let attachment = request.attachment.unwrap();
        assert_eq!(attachment.mime_type, "image/png");
        assert_eq!(attachment.data, vec![1, 2, 3]);
    }

    #[test]
    fn unsupported_image_type_is_invalid() {
        assert!(matches!(
            image_to_document(vec![1], "image/gif"),
            Err(FlowError::InvalidInput(_))
        ));
    }

    #[test]
    fn empty_image_is_invalid() {
        assert!(matches!(
            image_to_document(Vec::new(), "image/jpeg"),
            Err(FlowError::InvalidInput(_))
        ));
    }

    #[test]
    fn alert_prompt_requests_the_report_schema() {
        let request = alert_detail("After-hours bulk export by jdoe").unwrap();
        assert_eq!(request.task_kind, TaskKind::AlertDetailFromSummary);
        assert!(request.prompt_text.contains("After-hours bulk export by jdoe"));
        let schema = request.response_schema.unwrap();
        let required = schema.required.unwrap();
        for field in ["user", "action", "cwe", "risk", "details", "recommendation"] {
            assert!(required.contains(&field.to_string()), "missing {field}");
        }
    }

    #[test]
    fn empty_alert_summary_is_invalid() {
        assert!(matches!(
            alert_detail(""),
            Err(FlowError::InvalidInput(_))
        ));
    }
}
