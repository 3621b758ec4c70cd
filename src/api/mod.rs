//! HTTP API handlers

pub mod auth;
pub mod chat;
pub mod course;
pub mod health;
pub mod search;

pub use auth::{check_auth, signin, signout, signup};
pub use chat::{chat, gemini_proxy};
pub use course::generate_course;
pub use health::health_check;
pub use search::search_videos;

use crate::error::ApiError;
use crate::services::GenerateError;

/// Map a generation-client failure to a request error, prefixing plain
/// upstream failures with endpoint context (the classified variants carry
/// their own fixed messages).
pub(crate) fn map_generate_error(err: GenerateError, context: &str) -> ApiError {
    match err {
        GenerateError::NotConfigured => ApiError::NotConfigured,
        GenerateError::InvalidApiKey => ApiError::InvalidApiKey,
        GenerateError::QuotaExceeded => ApiError::QuotaExceeded,
        GenerateError::Upstream(msg) => ApiError::Upstream(format!("{}: {}", context, msg)),
    }
}
