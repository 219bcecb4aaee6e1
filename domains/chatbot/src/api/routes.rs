//! Route definitions for Chatbot domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::chat;
use super::middleware::ChatbotState;

/// Create all Chatbot domain API routes, relative to the chatbot mount point
pub fn routes() -> Router<ChatbotState> {
    Router::new()
        .route("/chat", post(chat::chat_with_bot))
        .route("/voice-chat", post(chat::voice_chat_with_bot))
        .route("/health", get(chat::chatbot_health))
}
