//! Application bootstrap integration tests
//!
//! These mutate process environment variables, so they run serially.

use axum::http::{header, Method, Request, StatusCode};
use serial_test::serial;
use tower::ServiceExt;

use rewear_app::{build_cors_layer, create_app};
use rewear_common::Config;

use crate::common::{body_text, get_request, ChatbotTestApp};

const SERVICE_VARS: [&str; 6] = [
    "LLM_PROVIDER",
    "OPENROUTER_API_KEY",
    "STT_PROVIDER",
    "STT_API_KEY",
    "TTS_PROVIDER",
    "CHAT_LANGUAGE",
];

fn use_mock_services() {
    for key in SERVICE_VARS {
        std::env::remove_var(key);
    }
    std::env::set_var("LLM_PROVIDER", "mock");
    std::env::set_var("STT_PROVIDER", "mock");
    std::env::set_var("TTS_PROVIDER", "mock");
}

fn reset_env() {
    for key in SERVICE_VARS {
        std::env::remove_var(key);
    }
}

#[tokio::test]
#[serial]
async fn test_create_app_with_mock_services() {
    use_mock_services();

    let config = Config::from_env().unwrap();
    let app = create_app(&config).unwrap();

    let resp = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "OK");

    reset_env();
}

#[test]
#[serial]
fn test_create_app_rejects_placeholder_key() {
    use_mock_services();
    std::env::set_var("LLM_PROVIDER", "openrouter");
    std::env::set_var(
        "OPENROUTER_API_KEY",
        "sk-or-v1-your-openrouter-key-here", // pragma: allowlist secret
    );

    let config = Config::from_env().unwrap();
    let err = create_app(&config).unwrap_err();
    assert!(err.to_string().contains("placeholder"));

    reset_env();
}

#[test]
#[serial]
fn test_create_app_requires_stt_key() {
    use_mock_services();
    std::env::set_var("STT_PROVIDER", "whisper");

    let config = Config::from_env().unwrap();
    let err = create_app(&config).unwrap_err();
    assert!(err.to_string().contains("STT_API_KEY"));

    reset_env();
}

#[test]
#[serial]
fn test_create_app_rejects_unknown_tts_provider() {
    use_mock_services();
    std::env::set_var("TTS_PROVIDER", "espeak");

    let config = Config::from_env().unwrap();
    let err = create_app(&config).unwrap_err();
    assert!(err.to_string().contains("espeak"));

    reset_env();
}

#[tokio::test]
async fn test_cors_layer_allows_listed_origin_only() {
    let app = ChatbotTestApp::new();
    let router = app
        .test_router()
        .layer(build_cors_layer("https://rewear.app, https://admin.rewear.app"));

    let preflight = |origin: &str| {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/v1/chatbot/chat")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(axum::body::Body::empty())
            .unwrap()
    };

    let allowed = router
        .clone()
        .oneshot(preflight("https://admin.rewear.app"))
        .await
        .unwrap();
    assert_eq!(
        allowed.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://admin.rewear.app"
    );

    let denied = router
        .oneshot(preflight("https://evil.example"))
        .await
        .unwrap();
    assert!(!denied
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
