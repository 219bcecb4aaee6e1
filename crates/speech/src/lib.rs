//! ReWear Speech Services
//!
//! Converts between speech and text for the voice assistant:
//! - Speech-to-text through an OpenAI-compatible transcription endpoint
//! - Text-to-speech through the Google Translate TTS endpoint
//! - Mock services with request recording for testing and development
//!
//! Both adapters stage audio in scoped temporary files that are removed on
//! every exit path.

pub mod format;
pub mod gtts;
pub mod mock;
pub mod scratch;
pub mod whisper;

use base64::Engine;
use std::time::Duration;
use thiserror::Error;

pub use format::AudioFormat;

pub const DEFAULT_STT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_STT_MODEL: &str = "whisper-1";
pub const DEFAULT_STT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_TTS_BASE_URL: &str = "https://translate.google.com";
pub const DEFAULT_TTS_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_LANGUAGE: &str = "en";

/// Speech-to-text failures. All of them leave the request without text.
#[derive(Error, Debug)]
pub enum TranscriptionError {
    #[error("Transcription configuration error: {0}")]
    Configuration(String),

    #[error("Audio payload is empty")]
    EmptyAudio,

    #[error("Unsupported audio encoding")]
    UnsupportedFormat,

    #[error("Could not understand the audio")]
    Unintelligible,

    #[error("Transcription request error: {0}")]
    Request(String),

    #[error("Transcription response error: {0}")]
    Response(String),

    #[error("Audio staging failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Text-to-speech failures. Callers treat these as "no audio".
#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("Synthesis configuration error: {0}")]
    Configuration(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Nothing to synthesize")]
    EmptyText,

    #[error("Synthesis request error: {0}")]
    Request(String),

    #[error("Synthesis response error: {0}")]
    Response(String),

    #[error("Synthesis timed out after {0:?}")]
    Timeout(Duration),

    #[error("Audio staging failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Speech configuration failures, labelled by the service they belong to
#[derive(Error, Debug)]
pub enum SpeechConfigError {
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
}

/// Speech-to-text configuration
#[derive(Clone)]
pub struct TranscriptionConfig {
    /// Provider (whisper, mock)
    pub provider: String,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub language: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for TranscriptionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscriptionConfig")
            .field("provider", &self.provider)
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("language", &self.language)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Text-to-speech configuration
#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    /// Provider (gtts, mock)
    pub provider: String,
    pub base_url: String,
    pub timeout: Duration,
}

/// Speech services configuration
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    pub transcription: TranscriptionConfig,
    pub synthesis: SynthesisConfig,
}

fn timeout_from_env(key: &str, default_secs: u64) -> Result<Duration, String> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| format!("{key} must be an integer, got {raw:?}")),
        Err(_) => Ok(Duration::from_secs(default_secs)),
    }
}

impl SpeechConfig {
    /// Create speech config from environment variables
    pub fn from_env() -> Result<Self, SpeechConfigError> {
        dotenvy::dotenv().ok();

        let stt_provider = std::env::var("STT_PROVIDER").unwrap_or_else(|_| "whisper".to_string());
        let stt_api_key = std::env::var("STT_API_KEY").unwrap_or_default();

        if stt_provider != "mock" && stt_api_key.is_empty() {
            return Err(TranscriptionError::Configuration(
                "STT_API_KEY is required for the whisper provider".to_string(),
            )
            .into());
        }

        let transcription = TranscriptionConfig {
            provider: stt_provider,
            api_key: stt_api_key,
            base_url: std::env::var("STT_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_STT_BASE_URL.to_string()),
            model: std::env::var("STT_MODEL").unwrap_or_else(|_| DEFAULT_STT_MODEL.to_string()),
            language: std::env::var("STT_LANGUAGE")
                .unwrap_or_else(|_| DEFAULT_LANGUAGE.to_string()),
            timeout: timeout_from_env("STT_TIMEOUT_SECS", DEFAULT_STT_TIMEOUT_SECS)
                .map_err(TranscriptionError::Configuration)?,
        };

        let synthesis = SynthesisConfig {
            provider: std::env::var("TTS_PROVIDER").unwrap_or_else(|_| "gtts".to_string()),
            base_url: std::env::var("TTS_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_TTS_BASE_URL.to_string()),
            timeout: timeout_from_env("TTS_TIMEOUT_SECS", DEFAULT_TTS_TIMEOUT_SECS)
                .map_err(SynthesisError::Configuration)?,
        };

        Ok(Self {
            transcription,
            synthesis,
        })
    }
}

/// Speech recognizer
#[async_trait::async_trait]
pub trait SpeechToText: Send + Sync {
    /// Turn an uploaded recording into text
    async fn transcribe(&self, audio: &[u8]) -> Result<String, TranscriptionError>;
}

/// Speech synthesizer
#[async_trait::async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Render `text` spoken in `lang`, returning the raw audio bytes
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, SynthesisError>;
}

/// Best-effort synthesis: base64 audio on success, `None` on any failure.
pub async fn synthesize_base64(tts: &dyn TextToSpeech, text: &str, lang: &str) -> Option<String> {
    match tts.synthesize(text, lang).await {
        Ok(audio) => Some(base64::engine::general_purpose::STANDARD.encode(audio)),
        Err(e) => {
            tracing::warn!(error = %e, lang = %lang, "Audio generation failed, omitting audio");
            None
        }
    }
}

/// Factory for creating speech service implementations
pub struct SpeechServiceFactory;

impl SpeechServiceFactory {
    pub fn create_transcriber(
        config: TranscriptionConfig,
    ) -> Result<Box<dyn SpeechToText>, TranscriptionError> {
        match config.provider.as_str() {
            "whisper" => {
                tracing::info!(model = %config.model, "Creating Whisper transcription service");
                Ok(Box::new(whisper::WhisperTranscriber::new(config)?))
            }
            "mock" => {
                tracing::info!("Creating mock transcription service");
                Ok(Box::new(mock::MockSpeechToText::new()))
            }
            provider => Err(TranscriptionError::Configuration(format!(
                "Unknown speech-to-text provider: {}. Supported providers: whisper, mock",
                provider
            ))),
        }
    }

    pub fn create_synthesizer(
        config: SynthesisConfig,
    ) -> Result<Box<dyn TextToSpeech>, SynthesisError> {
        match config.provider.as_str() {
            "gtts" => {
                tracing::info!("Creating Google Translate TTS service");
                Ok(Box::new(gtts::GoogleTts::new(config)?))
            }
            "mock" => {
                tracing::info!("Creating mock TTS service");
                Ok(Box::new(mock::MockTextToSpeech::new()))
            }
            provider => Err(SynthesisError::Configuration(format!(
                "Unknown text-to-speech provider: {}. Supported providers: gtts, mock",
                provider
            ))),
        }
    }
}
