//! Common test utilities and fixtures for integration tests
//!
//! - `ChatbotTestApp`: the composed router wired to recording mocks
//! - Request builders for JSON and multipart bodies
//! - Response parsing

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use serde_json::Value;

use rewear_app::{body_limit_layer, build_router};
use rewear_chatbot::{ChatOrchestrator, ChatSettings, ChatbotState};
use rewear_common::config::DEFAULT_MAX_UPLOAD_BYTES;
use rewear_llm::mock::{MockLlmOutcome, MockLlmService};
use rewear_speech::mock::{MockSpeechToText, MockTextToSpeech};

pub const MULTIPART_BOUNDARY: &str = "rewear-test-boundary";

/// Minimal WAV header, enough for format sniffing
pub const WAV_BYTES: &[u8] = b"RIFF\x24\x00\x00\x00WAVEfmt ";

/// Application wired to mocks whose handles stay available for assertions
pub struct ChatbotTestApp {
    pub llm: MockLlmService,
    pub stt: MockSpeechToText,
    pub tts: MockTextToSpeech,
    state: ChatbotState,
}

impl ChatbotTestApp {
    pub fn new() -> Self {
        let llm = MockLlmService::with_outcome(MockLlmOutcome::Reply(
            "Happy to help you swap clothes!".to_string(),
        ));
        let stt = MockSpeechToText::new();
        let tts = MockTextToSpeech::new();

        let orchestrator = ChatOrchestrator::new(
            Arc::new(llm.clone()),
            Arc::new(stt.clone()),
            Arc::new(tts.clone()),
            ChatSettings::default(),
        );

        Self {
            llm,
            stt,
            tts,
            state: ChatbotState::new(orchestrator),
        }
    }

    /// Router as composed in production, with the default body limit
    pub fn test_router(&self) -> Router {
        build_router(self.state.clone()).layer(body_limit_layer(DEFAULT_MAX_UPLOAD_BYTES))
    }
}

/// Build a JSON POST request
pub fn json_request(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// Build a multipart POST request with a single file field
pub fn multipart_request(uri: &str, field: &str, bytes: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"voice.wav\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: audio/wav\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Build a GET request
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Parse response body as JSON Value
pub async fn parse_body(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Read response body as text
pub async fn body_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}
