//! Chat orchestrator: drives one request through the assistant pipeline
//!
//! speech-to-text (voice only) → sentiment → session → completion → text-to-speech
//!
//! The orchestrator holds no per-conversation state; every request builds a
//! fresh session. Stages after input acquisition run on their own task so an
//! unexpected fault surfaces as a phase-labelled error instead of tearing
//! down the connection.

use std::sync::Arc;

use rewear_llm::LlmService;
use rewear_speech::{synthesize_base64, SpeechToText, TextToSpeech, DEFAULT_LANGUAGE};

use crate::domain::completion::{CompletionClient, CompletionOptions};
use crate::domain::entities::ChatTurn;
use crate::domain::error::{ChatError, ChatPhase};
use crate::domain::sentiment::{self, Sentiment};
use crate::domain::session::ConversationSession;

/// Settings applied to every request
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSettings {
    pub completion: CompletionOptions,
    /// Language of the synthesized reply
    pub language: String,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            completion: CompletionOptions::default(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl ChatSettings {
    /// Read `CHAT_LANGUAGE`; everything else keeps its default
    pub fn from_env() -> Self {
        let language = std::env::var("CHAT_LANGUAGE")
            .ok()
            .filter(|lang| !lang.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        Self {
            language,
            ..Self::default()
        }
    }
}

/// The assembled answer to one chat request
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub response: String,
    /// Base64 encoded MP3, absent when synthesis failed
    pub audio: Option<String>,
    pub sentiment: Sentiment,
}

#[derive(Clone)]
pub struct ChatOrchestrator {
    completion: CompletionClient,
    stt: Arc<dyn SpeechToText>,
    tts: Arc<dyn TextToSpeech>,
    settings: Arc<ChatSettings>,
}

impl ChatOrchestrator {
    pub fn new(
        llm: Arc<dyn LlmService>,
        stt: Arc<dyn SpeechToText>,
        tts: Arc<dyn TextToSpeech>,
        settings: ChatSettings,
    ) -> Self {
        Self {
            completion: CompletionClient::new(llm),
            stt,
            tts,
            settings: Arc::new(settings),
        }
    }

    /// Answer a text message, replaying `history` when the caller supplies one
    pub async fn chat(
        &self,
        message: String,
        history: Vec<ChatTurn>,
    ) -> Result<ChatReply, ChatError> {
        self.run_isolated(ChatPhase::Chat, message, history).await
    }

    /// Transcribe a recording and answer it. Transcription failures end the request.
    pub async fn voice_chat(&self, audio: &[u8]) -> Result<ChatReply, ChatError> {
        let message = self.stt.transcribe(audio).await.map_err(|e| {
            tracing::warn!(error = %e, bytes = audio.len(), "Speech recognition failed");
            ChatError::Transcription(e)
        })?;

        tracing::debug!(chars = message.chars().count(), "Voice message transcribed");

        self.run_isolated(ChatPhase::VoiceChat, message, Vec::new())
            .await
    }

    async fn run_isolated(
        &self,
        phase: ChatPhase,
        message: String,
        history: Vec<ChatTurn>,
    ) -> Result<ChatReply, ChatError> {
        let pipeline = self.clone();
        tokio::spawn(async move { pipeline.respond(message, history).await })
            .await
            .map_err(|e| ChatError::Processing {
                phase,
                detail: e.to_string(),
            })
    }

    async fn respond(&self, message: String, history: Vec<ChatTurn>) -> ChatReply {
        let sentiment = sentiment::classify(&message);
        tracing::info!(%sentiment, history_turns = history.len(), "Processing chat message");

        let session = ConversationSession::today();
        let messages = session.build_messages(&message, Some(history.as_slice()));

        let reply = self
            .completion
            .complete(&messages, &self.settings.completion)
            .await;
        if reply.is_degraded() {
            tracing::warn!("Returning degraded assistant reply");
        }
        let response = reply.into_text();

        let audio = synthesize_base64(self.tts.as_ref(), &response, &self.settings.language).await;
        if audio.is_none() {
            tracing::info!("Responding without audio");
        }

        ChatReply {
            response,
            audio,
            sentiment,
        }
    }
}
