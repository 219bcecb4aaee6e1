//! ReWear LLM Service
//!
//! Provides chat completions for the assistant:
//! - OpenRouter (OpenAI-compatible) chat-completions client for production
//! - Mock service with request recording for testing and development
//! - Environment-driven configuration with eager credential validation

pub mod mock;
pub mod openrouter;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash-preview-04-17";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Placeholder key shipped in the sample `.env`
const PLACEHOLDER_API_KEY: &str = "sk-or-v1-your-openrouter-key-here";
const API_KEY_PREFIX: &str = "sk-or-v1-";

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM configuration error: {0}")]
    Configuration(String),

    #[error("LLM request error: {0}")]
    Request(String),

    #[error("LLM response error: {0}")]
    Response(String),

    #[error("LLM rate limit exceeded")]
    RateLimit,
}

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmRole {
    System,
    User,
    Assistant,
}

impl LlmRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmRole::System => "system",
            LlmRole::User => "user",
            LlmRole::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmMessage {
    pub role: LlmRole,
    pub content: String,
}

/// A completion request. An empty `model` selects the service default.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<LlmMessage>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    /// Text of the first choice; `None` when the service returned no content
    pub content: Option<String>,
    pub model: String,
    pub finish_reason: Option<String>,
}

/// LLM service configuration
#[derive(Clone)]
pub struct LlmConfig {
    /// LLM provider (openrouter, mock)
    pub provider: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub default_model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl LlmConfig {
    /// Create LLM config from environment variables.
    ///
    /// Credentials are validated here so a misconfigured process fails
    /// before serving any request.
    pub fn from_env() -> Result<Self, LlmError> {
        dotenvy::dotenv().ok();

        let provider = std::env::var("LLM_PROVIDER").unwrap_or_else(|_| "openrouter".to_string());
        let api_key = std::env::var("OPENROUTER_API_KEY").unwrap_or_default();
        let base_url = std::env::var("LLM_BASE_URL").ok();
        let default_model =
            std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let timeout_secs = match std::env::var("LLM_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                LlmError::Configuration(format!("LLM_TIMEOUT_SECS must be an integer, got {raw:?}"))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let config = Self {
            provider,
            api_key,
            base_url,
            default_model,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(timeout_secs),
        };
        config.validate()?;

        Ok(config)
    }

    /// Check provider credentials. The mock provider needs none.
    pub fn validate(&self) -> Result<(), LlmError> {
        if self.provider == "mock" {
            return Ok(());
        }

        if self.api_key.is_empty() {
            return Err(LlmError::Configuration(
                "OPENROUTER_API_KEY not found in environment variables".to_string(),
            ));
        }
        if self.api_key == PLACEHOLDER_API_KEY {
            return Err(LlmError::Configuration(
                "OPENROUTER_API_KEY still holds the placeholder value; set a real key from https://openrouter.ai/keys".to_string(),
            ));
        }
        if !self.api_key.starts_with(API_KEY_PREFIX) {
            return Err(LlmError::Configuration(format!(
                "Invalid OpenRouter API key format: the key should start with '{}'",
                API_KEY_PREFIX
            )));
        }

        Ok(())
    }
}

/// Chat completion service trait for different providers
#[async_trait::async_trait]
pub trait LlmService: Send + Sync {
    /// Send a message sequence and return the generated reply
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Model used when a request leaves `model` empty
    fn default_model(&self) -> &str;
}

/// Factory for creating LlmService implementations
pub struct LlmServiceFactory;

impl LlmServiceFactory {
    pub fn create(config: LlmConfig) -> Result<Box<dyn LlmService>, LlmError> {
        match config.provider.as_str() {
            "openrouter" => {
                config.validate()?;
                tracing::info!(model = %config.default_model, "Creating OpenRouter LLM service");
                Ok(Box::new(openrouter::OpenRouterService::new(config)?))
            }
            "mock" => {
                tracing::info!("Creating mock LLM service");
                Ok(Box::new(mock::MockLlmService::new()))
            }
            provider => Err(LlmError::Configuration(format!(
                "Unknown LLM provider: {}. Supported providers: openrouter, mock",
                provider
            ))),
        }
    }
}
