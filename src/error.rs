//! Error types for the Learnly API
//!
//! Defines the request-level error taxonomy using thiserror. Every variant
//! maps to a stable HTTP status code and is rendered as a `{"error": ...}`
//! JSON body, so no failure ever escapes as a raw panic or stack trace.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Request-level error type for all API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// No valid session cookie accompanied the request
    #[error("Authentication required")]
    Unauthorized,

    /// Sign-in failure; one message for unknown email and wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Missing or invalid input fields
    #[error("{0}")]
    BadRequest(String),

    /// Duplicate account registration
    #[error("{0}")]
    Conflict(String),

    /// Generation upstream credential is absent
    #[error("Gemini API is not configured on the server")]
    NotConfigured,

    /// Generation upstream rejected the configured credential
    #[error("Invalid API key configuration")]
    InvalidApiKey,

    /// Generation upstream reported quota/rate exhaustion
    #[error("API quota exceeded")]
    QuotaExceeded,

    /// Any other classified upstream failure
    #[error("{0}")]
    Upstream(String),

    /// Uncaught internal failure (store I/O, serialization, ...)
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
            ApiError::NotConfigured
            | ApiError::InvalidApiKey
            | ApiError::Upstream(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Convenience Result type for handler code
pub type Result<T> = std::result::Result<T, ApiError>;
