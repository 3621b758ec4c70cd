//! Health check endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub gemini_status: String,
}

/// GET /api/health
///
/// No authentication required. Reports whether the generation upstream
/// credential is configured.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let gemini_status = if state.gemini.is_configured() {
        "configured"
    } else {
        "not configured"
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Learnly API is running".to_string(),
        gemini_status: gemini_status.to_string(),
    })
}
