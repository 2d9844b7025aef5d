use crate::api::{
    Blob, Content, GenerateContentConfig, GenerateContentParameters, GenerateContentResponse,
    Part as GeminiPart,
};
use crate::{client_utils, GenerationError, GenerationRequest, GenerationResult, ModelResponse};
use async_trait::async_trait;
use base64::Engine as _;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client,
};
use std::collections::HashMap;
use tracing::debug;

const PROVIDER: &str = "gemini";

/// The generation-service seam. One attempt per call; no retry, timeout, or
/// backoff. Failures propagate to the caller with the underlying cause.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> GenerationResult<ModelResponse>;
}

pub struct GeminiClient {
    model_id: String,
    api_key: String,
    base_url: String,
    client: Client,
    headers: HashMap<String, String>,
}

#[derive(Clone, Default)]
pub struct GeminiClientOptions {
    pub api_key: String,
    pub base_url: Option<String>,
    pub headers: Option<HashMap<String, String>>,
    pub client: Option<Client>,
}

impl GeminiClient {
    #[must_use]
    pub fn new(model_id: impl Into<String>, options: GeminiClientOptions) -> Self {
        let GeminiClientOptions {
            api_key,
            base_url,
            headers,
            client,
        } = options;

        let base_url = base_url
            .unwrap_or_else(|| "https://generativelanguage.googleapis.com/v1beta".to_string())
            .trim_end_matches('/')
            .to_string();
        let client = client.unwrap_or_else(Client::new);
        let headers = headers.unwrap_or_default();

        Self {
            model_id: model_id.into(),
            api_key,
            base_url,
            client,
            headers,
        }
    }

    #[must_use]
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    fn request_headers(&self) -> GenerationResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        for (key, value) in &self.headers {
            let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|error| {
                GenerationError::InvalidInput(format!("Invalid header name '{key}': {error}"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|error| {
                GenerationError::InvalidInput(format!("Invalid header value for '{key}': {error}"))
            })?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> GenerationResult<ModelResponse> {
        let task = request.task_kind;
        let params = convert_to_generate_content_parameters(request);

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model_id, self.api_key
        );

        let headers = self.request_headers()?;
        debug!(
            task = task.as_str(),
            model = %self.model_id,
            "sending generateContent request"
        );
        let response: GenerateContentResponse =
            client_utils::send_json(&self.client, &url, &params, headers).await?;

        if let Some(usage) = &response.usage_metadata {
            debug!(
                prompt_tokens = usage.prompt_token_count,
                candidate_tokens = usage.candidates_token_count,
                total_tokens = usage.total_token_count,
                "generateContent usage"
            );
        }

        let candidate = response
            .candidates
            .and_then(|c| c.into_iter().next())
            .ok_or_else(|| {
                GenerationError::Invariant(PROVIDER, "No candidate in response".to_string())
            })?;

        let text = collect_text(candidate.content.and_then(|c| c.parts).unwrap_or_default());
        if text.is_empty() {
            return Err(GenerationError::Invariant(
                PROVIDER,
                "Candidate contained no text parts".to_string(),
            ));
        }

        Ok(ModelResponse { text })
    }
}

fn convert_to_generate_content_parameters(request: GenerationRequest) -> GenerateContentParameters {
    let GenerationRequest {
        prompt_text,
        attachment,
        response_schema,
        ..
    } = request;

    let mut parts = Vec::new();
    if let Some(attachment) = attachment {
        parts.push(GeminiPart {
            inline_data: Some(Blob {
                data: Some(base64::engine::general_purpose::STANDARD.encode(&attachment.data)),
                mime_type: Some(attachment.mime_type),
            }),
            text: None,
        });
    }
    parts.push(GeminiPart {
        inline_data: None,
        text: Some(prompt_text),
    });

    let generation_config = response_schema.map(|schema| GenerateContentConfig {
        response_mime_type: Some("application/json".to_string()),
        response_schema: Some(schema),
        ..Default::default()
    });

    GenerateContentParameters {
        contents: vec![Content {
            parts: Some(parts),
            role: Some("user".to_string()),
        }],
        generation_config,
    }
}

fn collect_text(parts: Vec<GeminiPart>) -> String {
    parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect::<Vec<_>>()
        .join("")
}
