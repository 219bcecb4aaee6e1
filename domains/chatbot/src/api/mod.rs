//! HTTP surface of the chatbot domain

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::ChatbotState;
pub use routes::routes;
