//! Course generation endpoint
//!
//! Embeds the requested topic in a fixed prompt template, forwards it to
//! the generation upstream, and sanitizes the returned markup down to the
//! safe tag allow-list before it reaches the browser.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::map_generate_error;
use crate::error::{ApiError, Result};
use crate::sanitize::sanitize_html;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CourseRequest {
    #[serde(default)]
    topic: String,
}

#[derive(Debug, Serialize)]
pub struct CourseResponse {
    content: String,
}

/// Prompt template for structured course generation
fn course_prompt(topic: &str) -> String {
    format!(
        "Create a structured learning course about: {topic}\n\
         \n\
         Format the response as HTML with the following structure:\n\
         - A title (h3)\n\
         - An introductory paragraph\n\
         - 3-5 main sections with subheadings (h4) and brief explanations\n\
         - A conclusion paragraph\n\
         - A call-to-action button with the text \"Start Learning\"\n\
         \n\
         Use only basic HTML tags: h3, h4, p, strong, em, ul, li, and button.\n\
         Do not include any CSS classes or inline styles.\n\
         Keep the content concise and educational."
    )
}

/// POST /api/generate-course
pub async fn generate_course(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<CourseRequest>,
) -> Result<Json<CourseResponse>> {
    let user = state.sessions.authenticate(&jar).await?;

    let topic = req.topic.trim();
    if topic.is_empty() {
        return Err(ApiError::BadRequest("Topic is required".to_string()));
    }

    info!(email = %user.email, topic = %topic, "Course generation request");

    let raw = state
        .gemini
        .generate(&course_prompt(topic))
        .await
        .map_err(|e| map_generate_error(e, "Error generating course"))?;

    Ok(Json(CourseResponse {
        content: sanitize_html(&raw, topic),
    }))
}
