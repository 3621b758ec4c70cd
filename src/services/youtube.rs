//! YouTube video-search client
//!
//! Search is a degrade-gracefully dependency: a missing API key or any
//! upstream failure yields an empty result list, never a request failure.
//! Failures are logged and swallowed here.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const YOUTUBE_SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";

/// Result count requested when the caller does not specify one
pub const DEFAULT_MAX_RESULTS: u8 = 5;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One upstream-ranked search result
#[derive(Debug, Clone, Serialize)]
pub struct VideoResult {
    pub video_id: String,
    pub title: String,
    pub thumbnail: String,
    pub channel: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    channel_title: String,
    thumbnails: Thumbnails,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    high: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

/// Flatten the upstream response, keeping its ranking order.
/// Items missing a video id or a high-resolution thumbnail are skipped.
fn collect_results(response: SearchResponse) -> Vec<VideoResult> {
    response
        .items
        .into_iter()
        .filter_map(|item| {
            let video_id = item.id.video_id?;
            let thumbnail = item.snippet.thumbnails.high?;
            Some(VideoResult {
                video_id,
                title: item.snippet.title,
                thumbnail: thumbnail.url,
                channel: item.snippet.channel_title,
            })
        })
        .collect()
}

/// Client for the YouTube Data API search endpoint
pub struct YouTubeClient {
    http: reqwest::Client,
    api_key: Option<String>,
}

impl YouTubeClient {
    pub fn new(api_key: Option<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, api_key })
    }

    /// Search for videos matching `query`.
    ///
    /// Soft-fail contract: missing key or any upstream error returns an
    /// empty list. Errors never propagate to the caller.
    pub async fn search(&self, query: &str, max_results: u8) -> Vec<VideoResult> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::debug!("YouTube API key not configured, returning no results");
            return Vec::new();
        };

        match self.try_search(api_key, query, max_results).await {
            Ok(videos) => videos,
            Err(e) => {
                tracing::warn!("YouTube search failed: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_search(
        &self,
        api_key: &str,
        query: &str,
        max_results: u8,
    ) -> anyhow::Result<Vec<VideoResult>> {
        let max_results = max_results.to_string();
        let params = [
            ("part", "snippet"),
            ("q", query),
            ("maxResults", max_results.as_str()),
            ("type", "video"),
            ("relevanceLanguage", "en"),
            ("videoDuration", "medium"),
            ("videoDefinition", "high"),
            ("videoEmbeddable", "true"),
            ("key", api_key),
        ];

        tracing::debug!(query = query, "Querying YouTube search API");

        let response = self
            .http
            .get(YOUTUBE_SEARCH_URL)
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("YouTube API returned HTTP {}: {}", status, text);
        }

        let payload: SearchResponse = response.json().await?;
        Ok(collect_results(payload))
    }
}
