//! Server configuration
//!
//! All configuration comes from the environment: upstream API credentials,
//! the listening port, and the location of the flat-file user store. Both
//! API keys are optional; the clients degrade per their own policies when
//! a key is absent.

use std::path::PathBuf;

use anyhow::Context;

/// Default listening port when `PORT` is unset
pub const DEFAULT_PORT: u16 = 5000;

/// Default flat-file user store path
pub const DEFAULT_USERS_FILE: &str = "users.json";

/// Learnly server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Listening port
    pub port: u16,
    /// Credential for the generative-text upstream (`GEMINI_API_KEY`)
    pub gemini_api_key: Option<String>,
    /// Credential for the video-search upstream (`YOUTUBE_API_KEY`)
    pub youtube_api_key: Option<String>,
    /// Path of the JSON account store (`LEARNLY_USERS_FILE`)
    pub users_file: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match env_nonempty("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got {:?}", raw))?,
            None => DEFAULT_PORT,
        };

        let users_file = env_nonempty("LEARNLY_USERS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_USERS_FILE));

        Ok(Self {
            port,
            gemini_api_key: env_nonempty("GEMINI_API_KEY"),
            youtube_api_key: env_nonempty("YOUTUBE_API_KEY"),
            users_file,
        })
    }
}

/// Read an environment variable, treating empty/whitespace values as unset
fn env_nonempty(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(_) => None,
    }
}
