//! ReWear application composition root
//!
//! Loads the service configuration, wires the completion and speech
//! services into the chatbot orchestrator and composes the router.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use rewear_chatbot::{ChatOrchestrator, ChatSettings, ChatbotState};
use rewear_common::config::DEFAULT_LOG_FILTER;
use rewear_common::Config;
use rewear_llm::{LlmConfig, LlmServiceFactory};
use rewear_speech::{SpeechConfig, SpeechServiceFactory};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::EnvFilter;

/// Mount point of the chatbot API
pub const CHATBOT_PREFIX: &str = "/api/v1/chatbot";

/// Create the main application router with all routes and middleware.
///
/// Fails when any external service is misconfigured, so a bad deployment
/// never starts serving.
pub fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    let llm_config = LlmConfig::from_env()?;
    let llm = LlmServiceFactory::create(llm_config)?;

    let speech_config = SpeechConfig::from_env()?;
    let stt = SpeechServiceFactory::create_transcriber(speech_config.transcription)?;
    let tts = SpeechServiceFactory::create_synthesizer(speech_config.synthesis)?;

    let settings = ChatSettings::from_env();
    tracing::info!(language = %settings.language, "Chat settings loaded");

    let orchestrator = ChatOrchestrator::new(
        Arc::from(llm),
        Arc::from(stt),
        Arc::from(tts),
        settings,
    );

    let app = build_router(ChatbotState::new(orchestrator))
        .layer(body_limit_layer(config.max_upload_bytes));

    Ok(app)
}

/// Compose the domain router with the shared infrastructure routes
pub fn build_router(state: ChatbotState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(|| async { "Welcome to the ReWear API" }))
        .nest(CHATBOT_PREFIX, rewear_chatbot::routes().with_state(state))
}

/// CORS layer restricted to a comma separated list of origins
pub fn build_cors_layer(origins: &str) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Request body ceiling; also bounds multipart voice uploads
pub fn body_limit_layer(max_bytes: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_bytes)
}

/// Tracing filter from `RUST_LOG`, or `DEFAULT_LOG_FILTER` when it is unset or invalid
pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
