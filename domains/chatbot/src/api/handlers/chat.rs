//! Chat API handlers

use axum::{
    extract::{Multipart, State},
    Json,
};
use rewear_common::{Error, Result, ValidatedJson};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::{Validate, ValidationError};

use crate::api::middleware::ChatbotState;
use crate::domain::entities::{validate_caller_history, ChatTurn};
use crate::domain::orchestrator::ChatReply;
use crate::domain::sentiment::Sentiment;

/// Multipart field carrying the voice recording
pub const AUDIO_FIELD: &str = "audio_file";

/// Longest accepted chat message, in characters
pub const MAX_MESSAGE_CHARS: u64 = 10_000;

/// Request for a text chat turn
#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(max = MAX_MESSAGE_CHARS))]
    pub message: String,

    /// Prior turns kept by a stateless client, replayed verbatim when non-empty
    #[serde(default)]
    #[validate(custom(function = "validate_history"))]
    pub conversation_history: Vec<ChatTurn>,
}

fn validate_history(history: &[ChatTurn]) -> std::result::Result<(), ValidationError> {
    validate_caller_history(history).map_err(|e| {
        let message = match e {
            Error::Validation(message) => message,
            other => other.to_string(),
        };
        ValidationError::new("system_turn").with_message(message.into())
    })
}

/// Response for both chat endpoints
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub sentiment: Sentiment,
    /// Base64 encoded MP3, `null` when synthesis failed
    pub audio_base64: Option<String>,
}

impl From<ChatReply> for ChatResponse {
    fn from(reply: ChatReply) -> Self {
        Self {
            response: reply.response,
            sentiment: reply.sentiment,
            audio_base64: reply.audio,
        }
    }
}

/// Answer a text message
pub async fn chat_with_bot(
    State(state): State<ChatbotState>,
    ValidatedJson(req): ValidatedJson<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let reply = state
        .orchestrator
        .chat(req.message, req.conversation_history)
        .await?;

    Ok(Json(reply.into()))
}

/// Transcribe an uploaded recording and answer it
pub async fn voice_chat_with_bot(
    State(state): State<ChatbotState>,
    mut multipart: Multipart,
) -> Result<Json<ChatResponse>> {
    let mut audio = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::BadRequest(e.body_text()))?
    {
        if field.name() == Some(AUDIO_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| Error::BadRequest(e.body_text()))?;
            audio = Some(bytes);
            break;
        }
    }

    let audio = audio
        .ok_or_else(|| Error::Validation(format!("missing multipart field `{AUDIO_FIELD}`")))?;

    tracing::info!(bytes = audio.len(), "Received voice message");

    let reply = state.orchestrator.voice_chat(&audio).await?;
    Ok(Json(reply.into()))
}

/// Liveness of the chatbot service
pub async fn chatbot_health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "ReWearBot" }))
}
