//! Learnly backend server

use anyhow::Result;
use tracing::info;

use learnly::config::Config;
use learnly::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting Learnly API v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;

    if config.gemini_api_key.is_none() {
        info!("GEMINI_API_KEY not set - generation endpoints will report a configuration error");
    }
    if config.youtube_api_key.is_none() {
        info!("YOUTUBE_API_KEY not set - video search will return empty results");
    }
    info!("User store: {}", config.users_file.display());

    let state = AppState::new(&config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("Learnly API listening on http://0.0.0.0:{}", config.port);
    info!("Health check: http://127.0.0.1:{}/api/health", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
