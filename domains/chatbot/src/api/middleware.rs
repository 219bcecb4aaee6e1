//! Chatbot domain state

use crate::domain::orchestrator::ChatOrchestrator;

/// Application state for the Chatbot domain
#[derive(Clone)]
pub struct ChatbotState {
    pub orchestrator: ChatOrchestrator,
}

impl ChatbotState {
    pub fn new(orchestrator: ChatOrchestrator) -> Self {
        Self { orchestrator }
    }
}
