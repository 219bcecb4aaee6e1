//! Mock LLM Service Implementation
//!
//! Used by `LlmServiceFactory` when provider is `"mock"` and by tests.
//! Returns deterministic responses, records every request, and can be
//! programmed to return an empty payload or fail.

use crate::{CompletionRequest, CompletionResponse, LlmError, LlmService};
use std::sync::{Arc, Mutex, RwLock};

/// What the mock should answer with
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MockLlmOutcome {
    /// Echo the last message back
    #[default]
    Respond,
    /// Return a fixed reply
    Reply(String),
    /// Return a response without content
    Empty,
    /// Fail with a request error carrying this description
    Fail(String),
}

/// Mock LLM service for testing
#[derive(Debug, Clone, Default)]
pub struct MockLlmService {
    outcome: Arc<RwLock<MockLlmOutcome>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockLlmService {
    /// Create a new mock LLM service
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outcome(outcome: MockLlmOutcome) -> Self {
        let service = Self::new();
        service.set_outcome(outcome);
        service
    }

    /// Configure the mock outcome
    pub fn set_outcome(&self, outcome: MockLlmOutcome) {
        *self
            .outcome
            .write()
            .expect("outcome lock poisoned — prior test panicked") = outcome;
    }

    /// Return all recorded requests
    pub fn recorded_requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .expect("requests lock poisoned — prior test panicked")
            .clone()
    }
}

#[async_trait::async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        tracing::info!("Mock LLM service processing completion request");

        self.requests
            .lock()
            .map_err(|e| LlmError::Request(format!("requests lock poisoned: {e}")))?
            .push(request.clone());

        let outcome = self
            .outcome
            .read()
            .map_err(|e| LlmError::Request(format!("outcome lock poisoned: {e}")))?
            .clone();

        let model = if request.model.is_empty() {
            "mock-model".to_string()
        } else {
            request.model
        };

        let content = match outcome {
            MockLlmOutcome::Respond => {
                let last_message = request
                    .messages
                    .last()
                    .map(|m| m.content.as_str())
                    .unwrap_or("empty");
                Some(format!("Mock response to: {}", last_message))
            }
            MockLlmOutcome::Reply(text) => Some(text),
            MockLlmOutcome::Empty => None,
            MockLlmOutcome::Fail(reason) => return Err(LlmError::Request(reason)),
        };

        Ok(CompletionResponse {
            content,
            model,
            finish_reason: Some("stop".to_string()),
        })
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }
}
