//! The `Song` value object and the resolver that builds it from user input.

/// URL classification used to pick a lookup path and an error kind.
pub mod patterns;
/// Turns a resolved `Song` into a playable songbird track.
#[cfg(feature = "music")]
pub mod resource;
/// Collaborator traits and their `yt-dlp` / YouTube Data API implementations.
pub mod sources;

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::i18n::Catalog;
use sources::{VideoDetails, VideoInfoProvider, VideoSearcher};

/// Catalog key of the "now playing" announcement.
pub const STARTED_PLAYING_KEY: &str = "play.startedPlaying";

/// Errors that can occur while resolving a song.
#[derive(Error, Debug)]
pub enum SongError {
    /// The search produced nothing and the input was not a link.
    #[error("No search results found for {search:?}")]
    NoResults { search: String },

    /// The input looked like a link, but not a recognized video link, and the search produced nothing.
    #[error("{url:?} is not a recognized video URL and searching for {search:?} found nothing")]
    InvalidUrl { url: String, search: String },

    #[error("Video lookup failed for {url}: {reason}")]
    Lookup { url: String, reason: String },

    #[error("Search failed for {search:?}: {reason}")]
    Search { search: String, reason: String },

    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("Lookup for {url:?} returned an empty url or title")]
    IncompleteMetadata { url: String },
}

/// A resolved, playable track. Immutable once constructed.
///
/// Deserializing goes through [`Song::new`], so stored songs obey the same
/// non-empty url and title rule as looked-up ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SongData")]
pub struct Song {
    url: String,
    title: String,
    duration: u64,
}

impl Song {
    /// Creates a song, rejecting an empty url or title.
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        duration: u64,
    ) -> Result<Self, SongError> {
        let url = url.into();
        let title = title.into();

        if url.trim().is_empty() || title.trim().is_empty() {
            return Err(SongError::IncompleteMetadata { url });
        }

        Ok(Self {
            url,
            title,
            duration,
        })
    }

    /// Canonical playable URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Length in whole seconds.
    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// Duration formatted as `m:ss` or `h:mm:ss`.
    pub fn duration_string(&self) -> String {
        let hours = self.duration / 3600;
        let minutes = (self.duration % 3600) / 60;
        let seconds = self.duration % 60;

        if hours > 0 {
            format!("{}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            format!("{}:{:02}", minutes, seconds)
        }
    }

    /// The localized "now playing" announcement for this song.
    pub fn start_message(&self, catalog: &Catalog) -> String {
        catalog.format_message(
            STARTED_PLAYING_KEY,
            &[("title", self.title.as_str()), ("url", self.url.as_str())],
        )
    }
}

#[derive(Deserialize)]
struct SongData {
    url: String,
    title: String,
    duration: u64,
}

impl TryFrom<SongData> for Song {
    type Error = SongError;

    fn try_from(data: SongData) -> Result<Self, Self::Error> {
        Song::new(data.url, data.title, data.duration)
    }
}

impl TryFrom<VideoDetails> for Song {
    type Error = SongError;

    fn try_from(details: VideoDetails) -> Result<Self, Self::Error> {
        let duration =
            parse_duration_secs(&details.duration_in_sec).ok_or_else(|| SongError::Lookup {
                url: details.url.clone(),
                reason: format!("invalid duration {:?}", details.duration_in_sec),
            })?;

        Song::new(details.url, details.title, duration)
    }
}

/// Parses the leading integer of a duration-in-seconds value (`"212.7"` is 212).
///
/// Returns `None` when there are no leading digits or the value is negative.
pub fn parse_duration_secs(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    unsigned[..digits_end].parse::<u64>().ok()
}

/// Resolves user input into a [`Song`] through a metadata lookup and a search service.
///
/// Lookups are awaited one after the other and each is bounded by `lookup_timeout`.
#[derive(Clone)]
pub struct SongResolver {
    info: Arc<dyn VideoInfoProvider>,
    searcher: Arc<dyn VideoSearcher>,
    lookup_timeout: Duration,
}

impl SongResolver {
    pub fn new(
        info: Arc<dyn VideoInfoProvider>,
        searcher: Arc<dyn VideoSearcher>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            info,
            searcher,
            lookup_timeout,
        }
    }

    /// Resolves a free-form chat query: the first word is tried as a link and
    /// the whole query is used as the search text.
    pub async fn resolve_query(&self, query: &str) -> Result<Song, SongError> {
        let query = query.trim();
        let url = query.split_whitespace().next().unwrap_or_default();
        self.resolve(url, query).await
    }

    /// Resolves `url` directly when it is a video link, otherwise searches for `search_term`.
    pub async fn resolve(&self, url: &str, search_term: &str) -> Result<Song, SongError> {
        if patterns::is_video_url(url) {
            debug!("Resolving video URL: {}", url);
            return self.song_from_lookup(url).await;
        }

        debug!("Searching for: {}", search_term);
        let hit = self
            .bounded("search", self.searcher.search_one(search_term))
            .await?;

        let Some(hit) = hit else {
            info!("No results found for {}", search_term);

            if patterns::is_url(url) {
                return Err(SongError::InvalidUrl {
                    url: url.to_string(),
                    search: search_term.to_string(),
                });
            }

            return Err(SongError::NoResults {
                search: search_term.to_string(),
            });
        };

        self.song_from_lookup(&patterns::watch_url(&hit.id)).await
    }

    async fn song_from_lookup(&self, url: &str) -> Result<Song, SongError> {
        let details = self
            .bounded("video lookup", self.info.basic_info(url))
            .await?;
        let song = Song::try_from(details)?;

        info!("Resolved {} ({}s) at {}", song.title, song.duration, song.url);
        Ok(song)
    }

    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> Result<T, SongError>
    where
        F: Future<Output = Result<T, SongError>>,
    {
        tokio::time::timeout(self.lookup_timeout, call)
            .await
            .map_err(|_| SongError::Timeout {
                operation,
                after: self.lookup_timeout,
            })?
    }
}
