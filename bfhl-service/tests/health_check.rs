//! Health endpoint tests, in-process and over a real socket.

mod common;

use axum::http::{Method, StatusCode};
use bfhl_service::services::providers::mock::MockTextProvider;
use bfhl_service::startup::Application;
use common::{send, test_config, test_router, TEST_EMAIL};
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// Spawn the application on a random port and return the port number.
async fn spawn_app() -> u16 {
    let app = Application::build_with_provider(
        test_config(Duration::from_secs(5)),
        Arc::new(MockTextProvider::replying("Paris")),
    )
    .await
    .expect("Failed to build application");

    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    port
}

#[tokio::test]
async fn health_returns_identity_only() {
    let (status, body) = send(
        test_router(Arc::new(MockTextProvider::failing())),
        Method::GET,
        "/health",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "is_success": true, "official_email": TEST_EMAIL })
    );
}

#[tokio::test]
async fn served_app_answers_health_and_bfhl() {
    let port = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("http://127.0.0.1:{}/health", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["is_success"], true);
    assert_eq!(body["official_email"], TEST_EMAIL);

    let response = client
        .post(format!("http://127.0.0.1:{}/bfhl", port))
        .json(&json!({ "AI": "What is the capital of France?" }))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["data"], "Paris");
}
