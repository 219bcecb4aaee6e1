//! Voice chat endpoint integration tests

use axum::http::StatusCode;
use tower::ServiceExt;

use rewear_llm::LlmRole;
use rewear_speech::mock::{MockSynthesis, MockTranscription};

use crate::common::{multipart_request, parse_body, ChatbotTestApp, WAV_BYTES};

const VOICE_URI: &str = "/api/v1/chatbot/voice-chat";

#[tokio::test]
async fn test_voice_chat_answers_transcript() {
    let app = ChatbotTestApp::new();
    app.stt
        .set_outcome(MockTranscription::Text("This app is wonderful!".to_string()));

    let resp = app
        .test_router()
        .oneshot(multipart_request(VOICE_URI, "audio_file", WAV_BYTES))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = parse_body(resp).await;
    assert_eq!(body["response"], "Happy to help you swap clothes!");
    assert_eq!(body["sentiment"], "positive");
    assert!(body["audio_base64"].is_string());

    assert_eq!(app.stt.recorded_payloads(), vec![WAV_BYTES.to_vec()]);
    let messages = &app.llm.recorded_requests()[0].messages;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, LlmRole::System);
    assert_eq!(messages[1].content, "This app is wonderful!");
}

#[tokio::test]
async fn test_unintelligible_audio_returns_400() {
    let app = ChatbotTestApp::new();
    app.stt.set_outcome(MockTranscription::Unintelligible);

    let resp = app
        .test_router()
        .oneshot(multipart_request(VOICE_URI, "audio_file", WAV_BYTES))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = parse_body(resp).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Could not understand the audio"));
    assert!(app.llm.recorded_requests().is_empty());
    assert!(app.tts.recorded_requests().is_empty());
}

#[tokio::test]
async fn test_recognizer_unavailable_returns_400() {
    let app = ChatbotTestApp::new();
    app.stt
        .set_outcome(MockTranscription::Unavailable("service timeout".to_string()));

    let resp = app
        .test_router()
        .oneshot(multipart_request(VOICE_URI, "audio_file", WAV_BYTES))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_tts_failure_returns_null_audio() {
    let app = ChatbotTestApp::new();
    app.tts.set_outcome(MockSynthesis::Fail("quota".to_string()));

    let resp = app
        .test_router()
        .oneshot(multipart_request(VOICE_URI, "audio_file", WAV_BYTES))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = parse_body(resp).await;
    assert!(body["audio_base64"].is_null());
    assert_eq!(body["response"], "Happy to help you swap clothes!");
}

#[tokio::test]
async fn test_missing_audio_field_returns_400() {
    let app = ChatbotTestApp::new();

    let resp = app
        .test_router()
        .oneshot(multipart_request(VOICE_URI, "recording", WAV_BYTES))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = parse_body(resp).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("audio_file"));
    assert!(app.stt.recorded_payloads().is_empty());
}
