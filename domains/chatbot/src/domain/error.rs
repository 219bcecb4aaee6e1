//! Chat pipeline errors
//!
//! Only two things can fail a chat request: a recording that cannot be
//! transcribed, and an unexpected fault inside the pipeline. Everything else
//! degrades inside its own stage.

use rewear_common::Error;
use rewear_speech::TranscriptionError;

/// Which endpoint's pipeline was running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatPhase {
    Chat,
    VoiceChat,
}

impl std::fmt::Display for ChatPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatPhase::Chat => write!(f, "chat processing failed"),
            ChatPhase::VoiceChat => write!(f, "voice chat processing failed"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Speech recognition failed: {0}")]
    Transcription(#[from] TranscriptionError),

    #[error("{phase}: {detail}")]
    Processing { phase: ChatPhase, detail: String },
}

impl From<ChatError> for Error {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Transcription(e) => {
                Error::BadRequest(format!("Speech recognition failed: {}", e))
            }
            ChatError::Processing { phase, detail } => {
                // Detail stays in the logs, the caller only learns the phase
                tracing::error!(%phase, %detail, "Chat pipeline fault");
                Error::Internal(phase.to_string())
            }
        }
    }
}
