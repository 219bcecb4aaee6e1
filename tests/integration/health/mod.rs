//! Health and root endpoint integration tests

use axum::http::StatusCode;
use tower::ServiceExt;

use crate::common::{body_text, get_request, parse_body, ChatbotTestApp};

#[tokio::test]
async fn test_chatbot_health() {
    let app = ChatbotTestApp::new();

    let resp = app
        .test_router()
        .oneshot(get_request("/api/v1/chatbot/health"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = parse_body(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "ReWearBot");
}

#[tokio::test]
async fn test_app_health() {
    let app = ChatbotTestApp::new();

    let resp = app
        .test_router()
        .oneshot(get_request("/health"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "OK");
}

#[tokio::test]
async fn test_root_welcome() {
    let app = ChatbotTestApp::new();

    let resp = app.test_router().oneshot(get_request("/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("ReWear"));
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = ChatbotTestApp::new();

    let resp = app
        .test_router()
        .oneshot(get_request("/api/v1/chatbot/unknown"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
