#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use bfhl_service::config::{BfhlConfig, GeminiSettings};
use bfhl_service::services::providers::TextProvider;
use bfhl_service::{build_router, AppState};
use http_body_util::BodyExt;
use service_core::config::Config;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

pub const TEST_EMAIL: &str = "tester@example.com";

pub fn test_config(timeout: Duration) -> BfhlConfig {
    BfhlConfig {
        common: Config {
            port: 0,
            ..Config::default()
        },
        official_email: TEST_EMAIL.to_string(),
        gemini: GeminiSettings {
            api_key: None,
            model: "gemini-1.5-flash".to_string(),
            timeout,
        },
    }
}

pub fn test_router(provider: Arc<dyn TextProvider>) -> Router {
    test_router_with_timeout(provider, Duration::from_secs(5))
}

pub fn test_router_with_timeout(provider: Arc<dyn TextProvider>, timeout: Duration) -> Router {
    build_router(AppState::new(test_config(timeout), provider))
}

/// Send a raw request and return the status with the decoded JSON body.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if body.is_some() {
        request = request.header(header::CONTENT_TYPE, "application/json");
    }
    let request = request
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}

pub async fn post_bfhl(app: Router, body: &str) -> (StatusCode, serde_json::Value) {
    send(app, Method::POST, "/bfhl", Some(body)).await
}

/// Assert a failure envelope with the given status and message.
pub fn assert_failure(
    (status, body): &(StatusCode, serde_json::Value),
    expected_status: StatusCode,
    expected_error: &str,
) {
    assert_eq!(*status, expected_status, "body: {body}");
    assert_eq!(body["is_success"], false);
    assert_eq!(body["official_email"], TEST_EMAIL);
    assert_eq!(body["error"], expected_error);
    assert!(body.get("data").is_none());
}
