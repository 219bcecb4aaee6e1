//! Google Translate TTS Implementation
//!
//! Fetches MP3 speech from the `translate_tts` endpoint. The endpoint only
//! accepts short inputs, so text is sent in chunks of at most
//! `MAX_CHUNK_CHARS` characters and the MP3 frames are concatenated. The
//! configured timeout bounds the whole synthesis, not each chunk.

use reqwest::Client;
use std::time::Duration;

use crate::scratch::ScratchFile;
use crate::{SynthesisConfig, SynthesisError, TextToSpeech};

/// Longest input accepted per request
pub const MAX_CHUNK_CHARS: usize = 100;

/// Language codes the endpoint serves voices for
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "af", "ar", "bg", "bn", "bs", "ca", "cs", "cy", "da", "de", "el", "en", "es", "et", "fi",
    "fr", "gu", "hi", "hr", "hu", "id", "is", "it", "ja", "jw", "km", "kn", "ko", "la", "lv",
    "ml", "mr", "ms", "my", "ne", "nl", "no", "pl", "pt", "ro", "ru", "si", "sk", "sq", "sr",
    "su", "sv", "sw", "ta", "te", "th", "tl", "tr", "uk", "ur", "vi", "zh-CN", "zh-TW",
];

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Split `text` into chunks of at most `max_chars` characters, breaking on
/// whitespace. Words longer than `max_chars` are split mid-word.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            chunks.push(word.into_iter().collect());
            word = rest;
        }

        let separator = usize::from(!current.is_empty());
        if current_len + separator + word.len() > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Text-to-speech client for the Google Translate TTS endpoint
pub struct GoogleTts {
    client: Client,
    url: String,
    timeout: Duration,
}

impl GoogleTts {
    pub fn new(config: SynthesisConfig) -> Result<Self, SynthesisError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                SynthesisError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            url: format!("{}/translate_tts", config.base_url.trim_end_matches('/')),
            timeout: config.timeout,
        })
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        lang: &str,
        idx: usize,
        total: usize,
    ) -> Result<Vec<u8>, SynthesisError> {
        let total_param = total.to_string();
        let idx_param = idx.to_string();
        let textlen_param = chunk.chars().count().to_string();

        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("ie", "UTF-8"),
                ("q", chunk),
                ("tl", lang),
                ("client", "tw-ob"),
                ("total", total_param.as_str()),
                ("idx", idx_param.as_str()),
                ("textlen", textlen_param.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SynthesisError::Request(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SynthesisError::Response(format!(
                "TTS endpoint returned {} for chunk {}/{}",
                status,
                idx + 1,
                total
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::Response(format!("Failed to read audio: {}", e)))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait::async_trait]
impl TextToSpeech for GoogleTts {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, SynthesisError> {
        if !SUPPORTED_LANGUAGES.contains(&lang) {
            return Err(SynthesisError::UnsupportedLanguage(lang.to_string()));
        }

        let chunks = split_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SynthesisError::EmptyText);
        }

        tracing::debug!(chunks = chunks.len(), lang = %lang, "Synthesizing speech");

        let mut scratch = ScratchFile::create("mp3").await?;
        let fetch_all = async {
            for (idx, chunk) in chunks.iter().enumerate() {
                let audio = self.fetch_chunk(chunk, lang, idx, chunks.len()).await?;
                scratch.append(&audio).await?;
            }
            Ok::<(), SynthesisError>(())
        };
        tokio::time::timeout(self.timeout, fetch_all)
            .await
            .map_err(|_| SynthesisError::Timeout(self.timeout))??;

        let audio = scratch.read_all().await?;
        if audio.is_empty() {
            return Err(SynthesisError::Response(
                "TTS endpoint returned no audio".to_string(),
            ));
        }
        Ok(audio)
    }
}
