use crate::dtos::ResponseEnvelope;
use crate::AppState;
use axum::{extract::State, Json};

/// Liveness probe. Does not touch the AI provider.
pub async fn health_check(State(state): State<AppState>) -> Json<ResponseEnvelope> {
    Json(ResponseEnvelope::health(&state.config.official_email))
}
