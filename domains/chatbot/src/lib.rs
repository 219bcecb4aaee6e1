//! Chatbot domain: ReWearBot text and voice assistant

pub mod api;
pub mod domain;

// Re-export domain types at the crate root for convenience
pub use domain::completion::{CompletionClient, CompletionOptions, CompletionReply};
pub use domain::entities::{ChatTurn, TurnRole};
pub use domain::error::{ChatError, ChatPhase};
pub use domain::orchestrator::{ChatOrchestrator, ChatReply, ChatSettings};
pub use domain::sentiment::{classify, polarity, Sentiment};
pub use domain::session::{system_instruction, ConversationSession};

// Re-export API types
pub use api::routes;
pub use api::ChatbotState;
