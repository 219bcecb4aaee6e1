//! Configuration management following 12-factor app principles
//!
//! Process-level settings are loaded from environment variables. External
//! service settings (completion, speech) live next to the services that use
//! them, see `rewear_llm::LlmConfig` and `rewear_speech::SpeechConfig`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Default request body ceiling, sized for short voice recordings
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Log filter applied when `RUST_LOG` is unset or unparsable
pub const DEFAULT_LOG_FILTER: &str = "rewear=debug";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Comma separated list of allowed CORS origins; permissive when unset
    pub cors_allowed_origins: Option<String>,

    /// Upper bound for request bodies (voice uploads included)
    pub max_upload_bytes: usize,

    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid port number, got {raw:?}"))?,
            Err(_) => 3000,
        };

        let max_upload_bytes = match env::var("MAX_UPLOAD_BYTES") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("MAX_UPLOAD_BYTES must be a byte count, got {raw:?}"))?,
            Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let config = Self {
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .filter(|origins| !origins.trim().is_empty()),
            max_upload_bytes,
            port,
        };

        Ok(config)
    }
}
