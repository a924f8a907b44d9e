//! HTTP handlers for the BFHL service.

pub mod bfhl;
pub mod health;

use crate::dtos::ResponseEnvelope;
use crate::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use service_core::error::AppError;

/// Render `err` as a failure envelope with its mapped status.
pub fn failure_response(official_email: &str, err: AppError) -> Response {
    match &err {
        AppError::InternalError(_) | AppError::ConfigError(_) => {
            tracing::error!(error = ?err, "Request failed with internal error")
        }
        AppError::ServiceUnavailable(_) => tracing::warn!(error = %err, "Upstream unavailable"),
        _ => tracing::info!(error = %err, "Request rejected"),
    }

    (
        err.status_code(),
        Json(ResponseEnvelope::failure(
            official_email,
            err.client_message(),
        )),
    )
        .into_response()
}

/// Fallback for unknown paths and unsupported methods.
pub async fn not_found(State(state): State<AppState>) -> Response {
    failure_response(
        &state.config.official_email,
        AppError::NotFound(anyhow::anyhow!("Not found")),
    )
}
