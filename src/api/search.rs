//! Video search endpoint

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ApiError, Result};
use crate::services::youtube::DEFAULT_MAX_RESULTS;
use crate::services::VideoResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    query: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    videos: Vec<VideoResult>,
}

/// POST /api/search-videos
///
/// Upstream search is soft-fail: an unconfigured or failing search service
/// yields an empty `videos` list with status 200, never an error.
pub async fn search_videos(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>> {
    let user = state.sessions.authenticate(&jar).await?;

    let query = req.query.trim();
    if query.is_empty() {
        return Err(ApiError::BadRequest("Search query is required".to_string()));
    }

    info!(email = %user.email, query = %query, "Video search request");

    let videos = state.youtube.search(query, DEFAULT_MAX_RESULTS).await;

    Ok(Json(SearchResponse { videos }))
}
