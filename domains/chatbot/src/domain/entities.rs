//! Domain entities for the Chatbot domain
//!
//! A conversation is an ordered list of turns. Turns are plain values: the
//! assistant keeps no history between requests.

use serde::{Deserialize, Serialize};

use rewear_common::{Error, Result};
use rewear_llm::{LlmMessage, LlmRole};

/// Author of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    System,
    User,
    Assistant,
}

impl std::fmt::Display for TurnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnRole::System => write!(f, "system"),
            TurnRole::User => write!(f, "user"),
            TurnRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl From<TurnRole> for LlmRole {
    fn from(role: TurnRole) -> Self {
        match role {
            TurnRole::System => LlmRole::System,
            TurnRole::User => LlmRole::User,
            TurnRole::Assistant => LlmRole::Assistant,
        }
    }
}

/// One `{role, content}` entry of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ChatTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

impl From<&ChatTurn> for LlmMessage {
    fn from(turn: &ChatTurn) -> Self {
        LlmMessage {
            role: turn.role.into(),
            content: turn.content.clone(),
        }
    }
}

/// Check a caller-supplied history before it is replayed to the model.
///
/// The server prepends the system instruction itself, so callers may only
/// send user and assistant turns.
pub fn validate_caller_history(history: &[ChatTurn]) -> Result<()> {
    if let Some(position) = history.iter().position(|t| t.role == TurnRole::System) {
        return Err(Error::Validation(format!(
            "conversation_history[{}]: system turns are not accepted",
            position
        )));
    }
    Ok(())
}
