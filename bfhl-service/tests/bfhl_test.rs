mod common;

use axum::http::{Method, StatusCode};
use bfhl_service::services::providers::mock::MockTextProvider;
use common::{assert_failure, post_bfhl, send, test_router, test_router_with_timeout, TEST_EMAIL};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn math_router() -> axum::Router {
    test_router(Arc::new(MockTextProvider::failing()))
}

fn assert_success(
    (status, body): &(StatusCode, serde_json::Value),
    expected_data: serde_json::Value,
) {
    assert_eq!(*status, StatusCode::OK, "body: {body}");
    assert_eq!(body["is_success"], true);
    assert_eq!(body["official_email"], TEST_EMAIL);
    assert_eq!(body["data"], expected_data);
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn fibonacci_returns_sequence() {
    let res = post_bfhl(math_router(), r#"{"fibonacci": 7}"#).await;
    assert_success(&res, json!([0, 1, 1, 2, 3, 5, 8]));

    let res = post_bfhl(math_router(), r#"{"fibonacci": 0}"#).await;
    assert_success(&res, json!([]));

    let res = post_bfhl(math_router(), r#"{"fibonacci": 1}"#).await;
    assert_success(&res, json!([0]));
}

#[tokio::test]
async fn fibonacci_at_limit_is_exact() {
    let (status, body) = post_bfhl(math_router(), r#"{"fibonacci": 100}"#).await;
    assert_eq!(status, StatusCode::OK);

    let seq = body["data"].as_array().unwrap();
    assert_eq!(seq.len(), 100);
    assert_eq!(seq[92], json!(7_540_113_804_746_346_429u64));
}

#[tokio::test]
async fn fibonacci_out_of_range_is_rejected() {
    for body in [r#"{"fibonacci": 101}"#, r#"{"fibonacci": -1}"#, r#"{"fibonacci": 3.5}"#] {
        let res = post_bfhl(math_router(), body).await;
        assert_failure(
            &res,
            StatusCode::BAD_REQUEST,
            "fibonacci must be a non-negative integer <= 100",
        );
    }
}

#[tokio::test]
async fn prime_filters_in_order() {
    let res = post_bfhl(math_router(), r#"{"prime": [1, 2, 3, 4, 5, 17]}"#).await;
    assert_success(&res, json!([2, 3, 5, 17]));

    let res = post_bfhl(math_router(), r#"{"prime": [17, 4, 2, 2, 0]}"#).await;
    assert_success(&res, json!([17, 2, 2]));

    let res = post_bfhl(math_router(), r#"{"prime": []}"#).await;
    assert_success(&res, json!([]));
}

#[tokio::test]
async fn prime_rejects_invalid_elements() {
    let res = post_bfhl(math_router(), r#"{"prime": [2, -3, 5]}"#).await;
    assert_failure(
        &res,
        StatusCode::BAD_REQUEST,
        "prime array must contain non-negative integers only",
    );

    let too_long = json!({ "prime": (0..101).collect::<Vec<u32>>() }).to_string();
    let res = post_bfhl(math_router(), &too_long).await;
    assert_failure(
        &res,
        StatusCode::BAD_REQUEST,
        "prime must be an array (max length 100)",
    );
}

#[tokio::test]
async fn lcm_and_hcf() {
    let res = post_bfhl(math_router(), r#"{"lcm": [4, 6]}"#).await;
    assert_success(&res, json!(12));

    let res = post_bfhl(math_router(), r#"{"hcf": [12, 18]}"#).await;
    assert_success(&res, json!(6));

    let res = post_bfhl(math_router(), r#"{"lcm": [5]}"#).await;
    assert_success(&res, json!(5));

    let res = post_bfhl(math_router(), r#"{"lcm": [3, 0, 7]}"#).await;
    assert_success(&res, json!(0));
}

#[tokio::test]
async fn lcm_and_hcf_reject_bad_arrays() {
    let res = post_bfhl(math_router(), r#"{"lcm": []}"#).await;
    assert_failure(
        &res,
        StatusCode::BAD_REQUEST,
        "lcm must be a non-empty integer array (max length 100)",
    );

    let res = post_bfhl(math_router(), r#"{"hcf": [12, "a"]}"#).await;
    assert_failure(
        &res,
        StatusCode::BAD_REQUEST,
        "hcf array must contain non-negative integers only",
    );

    let res = post_bfhl(
        math_router(),
        r#"{"lcm": [9007199254740881, 9007199254740847]}"#,
    )
    .await;
    assert_failure(&res, StatusCode::BAD_REQUEST, "lcm result is too large");
}

#[tokio::test]
async fn operation_key_cardinality() {
    let res = post_bfhl(math_router(), "{}").await;
    assert_failure(
        &res,
        StatusCode::BAD_REQUEST,
        "exactly one operation key required",
    );

    let res = post_bfhl(math_router(), r#"{"fibonacci": 5, "prime": [2]}"#).await;
    assert_failure(&res, StatusCode::BAD_REQUEST, "only one operation key allowed");

    // null values do not count as supplied
    let res = post_bfhl(math_router(), r#"{"fibonacci": 3, "prime": null}"#).await;
    assert_success(&res, json!([0, 1, 1]));
}

#[tokio::test]
async fn malformed_bodies_are_rejected() {
    for body in ["", "not json", "[1, 2]", "null", "7", r#""fibonacci""#] {
        let res = post_bfhl(math_router(), body).await;
        assert_failure(&res, StatusCode::BAD_REQUEST, "invalid JSON body");
    }

    let res = send(math_router(), Method::POST, "/bfhl", None).await;
    assert_failure(&res, StatusCode::BAD_REQUEST, "invalid JSON body");
}

#[tokio::test]
async fn ai_question_returns_single_word() {
    let provider = Arc::new(MockTextProvider::replying("Paris is the answer."));
    let app = test_router(provider.clone());

    let res = post_bfhl(app, r#"{"AI": "  What is the capital of France?  "}"#).await;
    assert_success(&res, json!("Paris"));

    let prompts = provider.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Question: What is the capital of France?\n"));
}

#[tokio::test]
async fn ai_empty_reply_is_unknown() {
    let app = test_router(Arc::new(MockTextProvider::empty()));
    let res = post_bfhl(app, r#"{"AI": "Anything?"}"#).await;
    assert_success(&res, json!("Unknown"));
}

#[tokio::test]
async fn ai_invalid_question_is_rejected_without_calling_provider() {
    let provider = Arc::new(MockTextProvider::replying("unused"));

    let res = post_bfhl(test_router(provider.clone()), r#"{"AI": "   "}"#).await;
    assert_failure(&res, StatusCode::BAD_REQUEST, "AI must be a non-empty string");

    let res = post_bfhl(test_router(provider.clone()), r#"{"AI": 12}"#).await;
    assert_failure(&res, StatusCode::BAD_REQUEST, "AI must be a non-empty string");

    let long = json!({ "AI": "q".repeat(501) }).to_string();
    let res = post_bfhl(test_router(provider.clone()), &long).await;
    assert_failure(&res, StatusCode::BAD_REQUEST, "AI question too long");

    assert!(provider.prompts().is_empty());
}

#[tokio::test]
async fn ai_provider_failure_is_service_unavailable() {
    let res = post_bfhl(math_router(), r#"{"AI": "Capital of France?"}"#).await;
    assert_failure(&res, StatusCode::SERVICE_UNAVAILABLE, "AI service unavailable");
}

#[tokio::test]
async fn ai_provider_timeout_is_service_unavailable() {
    let provider = MockTextProvider::replying("late").with_delay(Duration::from_secs(30));
    let app = test_router_with_timeout(Arc::new(provider), Duration::from_millis(50));

    let res = post_bfhl(app, r#"{"AI": "Capital of France?"}"#).await;
    assert_failure(&res, StatusCode::SERVICE_UNAVAILABLE, "AI service unavailable");
}

#[tokio::test]
async fn missing_credential_is_service_unavailable() {
    use bfhl_service::services::providers::unconfigured::UnconfiguredProvider;

    let app = test_router(Arc::new(UnconfiguredProvider));
    let res = post_bfhl(app, r#"{"AI": "Capital of France?"}"#).await;
    assert_failure(&res, StatusCode::SERVICE_UNAVAILABLE, "AI service unavailable");

    // math operations keep working
    let app = test_router(Arc::new(UnconfiguredProvider));
    let res = post_bfhl(app, r#"{"hcf": [8, 12]}"#).await;
    assert_success(&res, json!(4));
}

#[tokio::test]
async fn unknown_routes_and_methods_are_not_found() {
    let res = send(math_router(), Method::GET, "/bfhl", None).await;
    assert_failure(&res, StatusCode::NOT_FOUND, "Not found");

    let res = send(math_router(), Method::POST, "/health", Some("{}")).await;
    assert_failure(&res, StatusCode::NOT_FOUND, "Not found");

    let res = send(math_router(), Method::GET, "/does-not-exist", None).await;
    assert_failure(&res, StatusCode::NOT_FOUND, "Not found");
}

struct PanickingProvider;

#[async_trait::async_trait]
impl bfhl_service::services::providers::TextProvider for PanickingProvider {
    async fn generate(
        &self,
        _prompt: &str,
        _params: &bfhl_service::services::providers::GenerationParams,
    ) -> Result<
        bfhl_service::services::providers::ProviderResponse,
        bfhl_service::services::providers::ProviderError,
    > {
        panic!("provider bug");
    }

    async fn health_check(&self) -> Result<(), bfhl_service::services::providers::ProviderError> {
        Ok(())
    }
}

#[tokio::test]
async fn handler_panic_becomes_internal_error() {
    let app = test_router(Arc::new(PanickingProvider));
    let res = post_bfhl(app, r#"{"AI": "Capital of France?"}"#).await;
    assert_failure(&res, StatusCode::INTERNAL_SERVER_ERROR, "internal server error");
}
