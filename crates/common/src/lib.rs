//! Shared utilities, configuration, and error handling for ReWear
//!
//! - Configuration management following 12-factor principles
//! - Error types and their HTTP representation
//! - Custom axum extractors

pub mod config;
pub mod error;
pub mod extractors;

pub use config::Config;
pub use error::{Error, Result};
pub use extractors::ValidatedJson;
