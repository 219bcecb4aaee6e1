//! Completion client: turns a message list into a reply that is always usable
//!
//! Service failures never reach the caller as errors. They come back as a
//! degraded `CompletionReply` whose text tells the user what went wrong.

use std::sync::Arc;

use rewear_llm::{CompletionRequest, LlmMessage, LlmService};

use crate::domain::entities::ChatTurn;

/// Reply used when the service answers without content
pub const EMPTY_REPLY: &str = "Sorry, I couldn't generate a response.";

/// Prefix of the reply used when the service cannot be reached
pub const UNAVAILABLE_REPLY: &str = "Sorry, I'm having trouble connecting right now.";

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Per-request generation settings. An empty `model` uses the service default.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOptions {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            model: String::new(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Outcome of a completion call
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionReply {
    Generated(String),
    /// The service answered without text
    Empty,
    /// The service failed; carries the failure description
    Unavailable(String),
}

impl CompletionReply {
    pub fn is_degraded(&self) -> bool {
        !matches!(self, CompletionReply::Generated(_))
    }

    /// The user-facing reply text
    pub fn into_text(self) -> String {
        match self {
            CompletionReply::Generated(text) => text,
            CompletionReply::Empty => EMPTY_REPLY.to_string(),
            CompletionReply::Unavailable(reason) => {
                format!("{} Error: {}", UNAVAILABLE_REPLY, reason)
            }
        }
    }
}

#[derive(Clone)]
pub struct CompletionClient {
    llm: Arc<dyn LlmService>,
}

impl CompletionClient {
    pub fn new(llm: Arc<dyn LlmService>) -> Self {
        Self { llm }
    }

    pub async fn complete(
        &self,
        messages: &[ChatTurn],
        options: &CompletionOptions,
    ) -> CompletionReply {
        let request = CompletionRequest {
            model: options.model.clone(),
            messages: messages.iter().map(LlmMessage::from).collect(),
            temperature: Some(options.temperature),
            max_tokens: Some(options.max_tokens),
        };

        match self.llm.complete(request).await {
            Ok(response) => match response.content {
                Some(text) if !text.is_empty() => CompletionReply::Generated(text),
                _ => {
                    tracing::warn!(model = %response.model, "Completion returned no content");
                    CompletionReply::Empty
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Completion service unavailable, degrading reply");
                CompletionReply::Unavailable(e.to_string())
            }
        }
    }
}
