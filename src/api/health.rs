use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

use crate::state::AppState;

/// Basic health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = serde_json::json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "environment": state.config.sat.environment.as_str(),
    });

    (StatusCode::OK, Json(health))
}
