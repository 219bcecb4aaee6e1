//! Mock Speech Service Implementations
//!
//! Programmable mocks for speech workflows:
//! - `MockSpeechToText`: returns a transcript or a chosen failure
//! - `MockTextToSpeech`: returns fixed audio or fails
//!
//! Both record their inputs for test assertions.

use crate::{SpeechToText, SynthesisError, TextToSpeech, TranscriptionError};
use std::sync::{Arc, Mutex, RwLock};

/// What the mock recognizer should produce
#[derive(Debug, Clone, PartialEq)]
pub enum MockTranscription {
    Text(String),
    /// Audio that could not be understood
    Unintelligible,
    /// Recognizer unreachable
    Unavailable(String),
}

impl Default for MockTranscription {
    fn default() -> Self {
        Self::Text("Mock transcript".to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockSpeechToText {
    outcome: Arc<RwLock<MockTranscription>>,
    payloads: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MockSpeechToText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outcome(outcome: MockTranscription) -> Self {
        let service = Self::new();
        service.set_outcome(outcome);
        service
    }

    pub fn set_outcome(&self, outcome: MockTranscription) {
        *self
            .outcome
            .write()
            .expect("outcome lock poisoned — prior test panicked") = outcome;
    }

    /// Audio payloads received so far
    pub fn recorded_payloads(&self) -> Vec<Vec<u8>> {
        self.payloads
            .lock()
            .expect("payloads lock poisoned — prior test panicked")
            .clone()
    }
}

#[async_trait::async_trait]
impl SpeechToText for MockSpeechToText {
    async fn transcribe(&self, audio: &[u8]) -> Result<String, TranscriptionError> {
        tracing::debug!(bytes = audio.len(), "Mock STT: recording payload");
        self.payloads
            .lock()
            .map_err(|e| TranscriptionError::Request(format!("payloads lock poisoned: {e}")))?
            .push(audio.to_vec());

        let outcome = self
            .outcome
            .read()
            .map_err(|e| TranscriptionError::Request(format!("outcome lock poisoned: {e}")))?
            .clone();

        match outcome {
            MockTranscription::Text(text) => Ok(text),
            MockTranscription::Unintelligible => Err(TranscriptionError::Unintelligible),
            MockTranscription::Unavailable(reason) => Err(TranscriptionError::Request(reason)),
        }
    }
}

/// What the mock synthesizer should produce
#[derive(Debug, Clone, PartialEq)]
pub enum MockSynthesis {
    Audio(Vec<u8>),
    Fail(String),
}

impl Default for MockSynthesis {
    fn default() -> Self {
        Self::Audio(b"ID3mock-audio".to_vec())
    }
}

/// A recorded synthesis request
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedSynthesis {
    pub text: String,
    pub lang: String,
}

#[derive(Debug, Clone, Default)]
pub struct MockTextToSpeech {
    outcome: Arc<RwLock<MockSynthesis>>,
    requests: Arc<Mutex<Vec<RecordedSynthesis>>>,
}

impl MockTextToSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outcome(outcome: MockSynthesis) -> Self {
        let service = Self::new();
        service.set_outcome(outcome);
        service
    }

    pub fn set_outcome(&self, outcome: MockSynthesis) {
        *self
            .outcome
            .write()
            .expect("outcome lock poisoned — prior test panicked") = outcome;
    }

    pub fn recorded_requests(&self) -> Vec<RecordedSynthesis> {
        self.requests
            .lock()
            .expect("requests lock poisoned — prior test panicked")
            .clone()
    }
}

#[async_trait::async_trait]
impl TextToSpeech for MockTextToSpeech {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, SynthesisError> {
        tracing::debug!(lang = %lang, "Mock TTS: recording request");
        self.requests
            .lock()
            .map_err(|e| SynthesisError::Request(format!("requests lock poisoned: {e}")))?
            .push(RecordedSynthesis {
                text: text.to_string(),
                lang: lang.to_string(),
            });

        let outcome = self
            .outcome
            .read()
            .map_err(|e| SynthesisError::Request(format!("outcome lock poisoned: {e}")))?
            .clone();

        match outcome {
            MockSynthesis::Audio(audio) => Ok(audio),
            MockSynthesis::Fail(reason) => Err(SynthesisError::Request(reason)),
        }
    }
}
