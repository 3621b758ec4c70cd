//! Upstream service clients

pub mod gemini;
pub mod youtube;

pub use gemini::{GeminiClient, GenerateError};
pub use youtube::{VideoResult, YouTubeClient};
