//! Chat-style generation endpoints
//!
//! Both endpoints forward the raw user message to the generation upstream
//! and return its text unmodified (chat responses are plain conversation,
//! not embeddable HTML, so the course sanitizer does not apply here).
//! `/api/gemini` was historically unauthenticated despite being functionally
//! identical to `/api/chat`; both are now session-gated.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::map_generate_error;
use crate::error::{ApiError, Result};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    response: String,
}

#[derive(Debug, Serialize)]
pub struct GeminiProxyResponse {
    text: String,
}

/// POST /api/chat
pub async fn chat(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let user = state.sessions.authenticate(&jar).await?;

    if req.message.is_empty() {
        return Err(ApiError::BadRequest("Message is required".to_string()));
    }

    info!(email = %user.email, "Chat request");

    let text = state
        .gemini
        .generate(&req.message)
        .await
        .map_err(|e| map_generate_error(e, "Error communicating with Gemini API"))?;

    Ok(Json(ChatResponse { response: text }))
}

/// POST /api/gemini
pub async fn gemini_proxy(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<ChatRequest>,
) -> Result<Json<GeminiProxyResponse>> {
    state.sessions.authenticate(&jar).await?;

    if req.message.is_empty() {
        return Err(ApiError::BadRequest("Missing message".to_string()));
    }

    let text = state
        .gemini
        .generate(&req.message)
        .await
        .map_err(|e| map_generate_error(e, "Error communicating with Gemini API"))?;

    Ok(Json(GeminiProxyResponse { text }))
}
