//! Search through the YouTube Data API v3.
//! Requires the `YOUTUBE_API_KEY` environment variable.

use reqwest::Client;
use serde::Deserialize;
use serenity::async_trait;
use tracing::{debug, info};

use super::{SearchHit, VideoSearcher};
use crate::song::SongError;

/// Represents the relevant part of a `search.list` response.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

/// `VideoSearcher` that asks the YouTube Data API for a single video result.
#[derive(Debug, Clone)]
pub struct YoutubeDataApi {
    client: Client,
    base_url: String,
    api_key: String,
}

impl YoutubeDataApi {
    /// * `base_url` - API root without a trailing slash, e.g. `https://www.googleapis.com`.
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl VideoSearcher for YoutubeDataApi {
    async fn search_one(&self, text: &str) -> Result<Option<SearchHit>, SongError> {
        let text = text.trim();
        if text.is_empty() {
            debug!("Skipping search for blank text");
            return Ok(None);
        }

        info!("Searching the YouTube Data API for: {}", text);

        let search_error = |reason: String| SongError::Search {
            search: text.to_string(),
            reason,
        };

        let url = format!("{}/youtube/v3/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("maxResults", "1"),
                ("q", text),
                ("key", self.api_key.as_str()),
            ])
            .header("Accept", "application/json")
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| search_error(format!("API communication failure: {}", e.without_url())))?;

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| search_error(format!("Unable to parse response: {}", e)))?;

        Ok(body
            .items
            .into_iter()
            .find_map(|item| item.id.video_id)
            .map(|id| SearchHit { id }))
    }
}
