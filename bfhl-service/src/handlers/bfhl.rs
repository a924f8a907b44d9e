use crate::dtos::{OperationOutput, ResponseEnvelope};
use crate::error::BfhlError;
use crate::handlers::failure_response;
use crate::services::Operation;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};

/// `POST /bfhl`: run the single operation named in the body.
///
/// The body is parsed by hand so that malformed JSON and non-object bodies
/// get the same failure envelope as every other rejection.
pub async fn bfhl(State(state): State<AppState>, body: Bytes) -> Response {
    match process(&state, &body).await {
        Ok(output) => (
            StatusCode::OK,
            Json(ResponseEnvelope::success(
                &state.config.official_email,
                output,
            )),
        )
            .into_response(),
        Err(err) => {
            if let BfhlError::ServiceUnavailable(source) = &err {
                tracing::warn!(error = %source, "AI provider call failed");
            }
            failure_response(&state.config.official_email, err.into())
        }
    }
}

async fn process(state: &AppState, body: &[u8]) -> Result<OperationOutput, BfhlError> {
    let body = parse_object(body)?;
    let operation = Operation::decode(&body)?;
    let key = operation.key();

    tracing::debug!(operation = key.as_str(), "Dispatching operation");

    operation.execute(&state.answerer).await
}

fn parse_object(body: &[u8]) -> Result<Map<String, Value>, BfhlError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(BfhlError::InvalidJsonBody),
    }
}
