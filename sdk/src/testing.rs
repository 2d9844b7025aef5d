//! A scripted [`Generator`] for exercising flows without the live service.

use crate::{GenerationError, GenerationRequest, GenerationResult, Generator, ModelResponse};
use async_trait::async_trait;
use std::{collections::VecDeque, sync::Mutex};

#[derive(Default)]
struct MockGeneratorState {
    mocked_results: VecDeque<GenerationResult<ModelResponse>>,
    tracked_requests: Vec<GenerationRequest>,
}

/// Replays queued results in order and records every request it receives.
/// Calling it with an empty queue yields an `Invariant` error.
#[derive(Default)]
pub struct MockGenerator {
    state: Mutex<MockGeneratorState>,
}

impl MockGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply with the given text.
    pub fn enqueue_text(&self, text: impl Into<String>) -> &Self {
        self.enqueue_result(Ok(ModelResponse { text: text.into() }))
    }

    /// Queue an error to be returned for the next call.
    pub fn enqueue_error(&self, error: GenerationError) -> &Self {
        self.enqueue_result(Err(error))
    }

    pub fn enqueue_result(&self, result: GenerationResult<ModelResponse>) -> &Self {
        self.state
            .lock()
            .expect("mock generator lock")
            .mocked_results
            .push_back(result);
        self
    }

    /// Requests seen so far, in call order.
    #[must_use]
    pub fn tracked_requests(&self) -> Vec<GenerationRequest> {
        self.state
            .lock()
            .expect("mock generator lock")
            .tracked_requests
            .clone()
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, request: GenerationRequest) -> GenerationResult<ModelResponse> {
        let mut state = self.state.lock().expect("mock generator lock");
        state.tracked_requests.push(request);
        state.mocked_results.pop_front().unwrap_or_else(|| {
            Err(GenerationError::Invariant(
                "mock",
                "No mocked generate result queued".to_string(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TaskKind;

    fn request() -> GenerationRequest {
        GenerationRequest {
            task_kind: TaskKind::DiagramFromText,
            prompt_text: "prompt".to_string(),
            attachment: None,
            response_schema: None,
        }
    }

    #[tokio::test]
    async fn replays_results_in_order_and_tracks_requests() {
        let mock = MockGenerator::new();
        mock.enqueue_text("first").enqueue_text("second");

        let first = mock.generate(request()).await.unwrap();
        let second = mock.generate(request()).await.unwrap();
        assert_eq!(first.text, "first");
        assert_eq!(second.text, "second");
        assert_eq!(mock.tracked_requests().len(), 2);
    }

    #[tokio::test]
    async fn empty_queue_is_an_invariant_error() {
        let mock = MockGenerator::new();
        let error = mock.generate(request()).await.unwrap_err();
        assert!(matches!(error, GenerationError::Invariant("mock", _)));
    }
}
