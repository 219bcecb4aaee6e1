//! Whisper Transcription Implementation
//!
//! Posts recordings to an OpenAI-compatible `/audio/transcriptions`
//! endpoint as multipart form data.

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use crate::scratch::ScratchFile;
use crate::{AudioFormat, SpeechToText, TranscriptionConfig, TranscriptionError};

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Speech-to-text client for Whisper-compatible services
pub struct WhisperTranscriber {
    client: Client,
    config: TranscriptionConfig,
    url: String,
}

impl WhisperTranscriber {
    pub fn new(config: TranscriptionConfig) -> Result<Self, TranscriptionError> {
        if config.api_key.is_empty() {
            return Err(TranscriptionError::Configuration(
                "STT_API_KEY is required for the whisper provider".to_string(),
            ));
        }

        let client = Client::builder().timeout(config.timeout).build().map_err(|e| {
            TranscriptionError::Configuration(format!("Failed to build HTTP client: {}", e))
        })?;
        let url = format!(
            "{}/audio/transcriptions",
            config.base_url.trim_end_matches('/')
        );

        Ok(Self {
            client,
            config,
            url,
        })
    }
}

#[async_trait::async_trait]
impl SpeechToText for WhisperTranscriber {
    async fn transcribe(&self, audio: &[u8]) -> Result<String, TranscriptionError> {
        if audio.is_empty() {
            return Err(TranscriptionError::EmptyAudio);
        }
        let format = AudioFormat::sniff(audio).ok_or(TranscriptionError::UnsupportedFormat)?;

        // Staged on disk for the duration of this call; the upload streams from the file
        let mut scratch = ScratchFile::create(format.extension()).await?;
        scratch.append(audio).await?;
        let staged = scratch.open().await?;

        let part = Part::stream_with_length(staged, audio.len() as u64)
            .file_name(format!("voice.{}", format.extension()))
            .mime_str(format.mime_type())
            .map_err(|e| TranscriptionError::Request(format!("Invalid audio part: {}", e)))?;

        let form = Form::new()
            .part("file", part)
            .text("model", self.config.model.clone())
            .text("language", self.config.language.clone());

        tracing::debug!(
            bytes = audio.len(),
            format = format.extension(),
            model = %self.config.model,
            "Sending transcription request"
        );

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::Request(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());

            if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&error_body) {
                return Err(TranscriptionError::Response(format!(
                    "Recognizer returned {}: {}",
                    status, error_response.error.message
                )));
            }

            return Err(TranscriptionError::Response(format!(
                "Recognizer returned {}: {}",
                status, error_body
            )));
        }

        let transcript: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::Response(format!("Failed to parse response: {}", e)))?;

        let text = transcript.text.trim();
        if text.is_empty() {
            return Err(TranscriptionError::Unintelligible);
        }

        Ok(text.to_string())
    }
}
