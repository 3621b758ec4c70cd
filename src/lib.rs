//! Learnly backend library
//!
//! Session-authenticated HTTP backend that proxies requests to a
//! generative-text upstream and a video-search upstream, sanitizing
//! generated course markup before it reaches the browser. Accounts live in
//! a flat JSON file; sessions are in-memory cookie-backed tokens.

use std::sync::Arc;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod sanitize;
pub mod services;
pub mod session;

use config::Config;
use db::UserStore;
use services::{GeminiClient, YouTubeClient};
use session::SessionStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Flat-file account store
    pub users: Arc<UserStore>,
    /// In-memory session authority
    pub sessions: Arc<SessionStore>,
    /// Generation upstream client
    pub gemini: Arc<GeminiClient>,
    /// Video-search upstream client
    pub youtube: Arc<YouTubeClient>,
}

impl AppState {
    /// Build application state from configuration
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            users: Arc::new(UserStore::new(config.users_file.clone())),
            sessions: Arc::new(SessionStore::new()),
            gemini: Arc::new(GeminiClient::new(config.gemini_api_key.clone())?),
            youtube: Arc::new(YouTubeClient::new(config.youtube_api_key.clone())?),
        })
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/signup", post(api::signup))
        .route("/api/auth/signin", post(api::signin))
        .route("/api/auth/signout", post(api::signout))
        .route("/api/auth/check", get(api::check_auth))
        .route("/api/chat", post(api::chat))
        .route("/api/gemini", post(api::gemini_proxy))
        .route("/api/generate-course", post(api::generate_course))
        .route("/api/search-videos", post(api::search_videos))
        .route("/api/health", get(api::health_check))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS with credentials; origin is mirrored because the session cookie
/// requires `Access-Control-Allow-Credentials`, which forbids a wildcard
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
