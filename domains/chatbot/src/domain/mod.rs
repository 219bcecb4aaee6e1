//! Domain layer for the Chatbot domain

pub mod completion;
pub mod entities;
pub mod error;
pub mod orchestrator;
pub mod sentiment;
pub mod session;
