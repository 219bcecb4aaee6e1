//! OpenRouter Chat Completions Implementation
//!
//! Calls the OpenAI-compatible chat-completions API exposed by OpenRouter
//! (https://openrouter.ai/api/v1/chat/completions) using reqwest.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    CompletionRequest, CompletionResponse, LlmConfig, LlmError, LlmService, DEFAULT_BASE_URL,
};

/// Chat-completions request body
#[derive(Debug, Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: Vec<MessageBody<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct MessageBody<'a> {
    role: &'static str,
    content: &'a str,
}

/// Chat-completions response body
#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// OpenAI-style error response
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    code: Option<serde_json::Value>,
}

/// OpenRouter LLM service implementation
pub struct OpenRouterService {
    client: Client,
    config: LlmConfig,
    base_url: String,
}

impl OpenRouterService {
    /// Create a new OpenRouter service; the HTTP client enforces the configured timeout
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            base_url,
        })
    }
}

#[async_trait::async_trait]
impl LlmService for OpenRouterService {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let model = if request.model.is_empty() {
            self.config.default_model.as_str()
        } else {
            request.model.as_str()
        };

        let max_tokens = request.max_tokens.unwrap_or(self.config.max_tokens);

        let body = ChatCompletionsRequest {
            model,
            messages: request
                .messages
                .iter()
                .map(|m| MessageBody {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: request.temperature,
            max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url);

        tracing::debug!(
            model = %model,
            max_tokens = %max_tokens,
            messages = body.messages.len(),
            "Sending OpenRouter chat-completions request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Request(format!("HTTP request failed: {}", e)))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimit);
        }

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());

            if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&error_body) {
                let code = error_response
                    .error
                    .code
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| status.as_u16().to_string());
                return Err(LlmError::Response(format!(
                    "OpenRouter API error ({}): {}",
                    code, error_response.error.message
                )));
            }

            return Err(LlmError::Response(format!(
                "OpenRouter API returned {}: {}",
                status, error_body
            )));
        }

        let api_response: ChatCompletionsResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Response(format!("Failed to parse response: {}", e)))?;

        let first = api_response.choices.into_iter().next();
        let finish_reason = first.as_ref().and_then(|c| c.finish_reason.clone());
        let content = first
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|text| !text.is_empty());

        Ok(CompletionResponse {
            content,
            model: api_response.model.unwrap_or_else(|| model.to_string()),
            finish_reason,
        })
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }
}
