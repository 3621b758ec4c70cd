//! Gemini generation client
//!
//! Sends a text prompt to the Gemini REST API and returns the raw response
//! text. Failures are classified by inspecting the upstream error text for
//! known marker substrings; that text is untrusted and carries no structured
//! code, so the classification is best-effort. No retries: every call has a
//! single terminal outcome.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Upstream calls are bounded; the original design had no timeout at all
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Generation client errors
#[derive(Debug, Error)]
pub enum GenerateError {
    /// No API key configured; detected before any network call
    #[error("Gemini API is not configured on the server")]
    NotConfigured,

    /// Upstream rejected the configured key (`API_KEY_INVALID` marker)
    #[error("Invalid API key configuration")]
    InvalidApiKey,

    /// Upstream reported quota/rate exhaustion (`quota` marker)
    #[error("API quota exceeded")]
    QuotaExceeded,

    /// Any other upstream failure, carrying the original message
    #[error("{0}")]
    Upstream(String),
}

/// Classify raw upstream failure text by marker substrings.
///
/// `API_KEY_INVALID` and (case-insensitive) `quota` are the only stable
/// signals the service exposes; anything else passes through verbatim.
fn classify(message: &str) -> GenerateError {
    if message.contains("API_KEY_INVALID") {
        GenerateError::InvalidApiKey
    } else if message.to_lowercase().contains("quota") {
        GenerateError::QuotaExceeded
    } else {
        GenerateError::Upstream(message.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any
    fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Client for the Gemini generateContent endpoint
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, api_key })
    }

    /// Whether an API key is configured (reported by the health endpoint)
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send `prompt` and return the raw generated text.
    ///
    /// Fails with [`GenerateError::NotConfigured`] before any network call
    /// when no key is present; otherwise maps upstream failures through
    /// [`classify`].
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let api_key = self.api_key.as_deref().ok_or(GenerateError::NotConfigured)?;

        let url = format!("{}/{}:generateContent", GEMINI_ENDPOINT, GEMINI_MODEL);
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        tracing::debug!(prompt_len = prompt.len(), "Calling Gemini generateContent");

        let response = self
            .http
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| classify(&e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Gemini API call failed");
            if text.is_empty() {
                return Err(GenerateError::Upstream(format!(
                    "Gemini API returned HTTP {}",
                    status
                )));
            }
            return Err(classify(&text));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::Upstream(format!("Invalid Gemini response: {}", e)))?;

        payload
            .first_text()
            .ok_or_else(|| GenerateError::Upstream("Gemini API returned no content".to_string()))
    }
}
