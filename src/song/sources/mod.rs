//! Interfaces to the external services a `Song` is built from, and their
//! implementations.

/// `VideoSearcher` backed by the YouTube Data API v3.
pub mod youtube_api;
/// Metadata lookups, searches, and audio streams through the `yt-dlp` executable.
pub mod ytdlp;

use serenity::async_trait;

use super::SongError;
#[cfg(feature = "music")]
use super::resource::MaterializeError;
#[cfg(feature = "music")]
use songbird::input::Input;

/// Basic information about a single video, as reported by the lookup service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDetails {
    /// Canonical watch URL.
    pub url: String,
    pub title: String,
    /// Raw duration text; converted with integer-prefix parsing.
    pub duration_in_sec: String,
}

/// A single search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Video id used to derive the watch URL.
    pub id: String,
}

/// Looks up basic video information for a URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoInfoProvider: Send + Sync {
    async fn basic_info(&self, url: &str) -> Result<VideoDetails, SongError>;
}

/// Finds the single best video for free-text search terms.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoSearcher: Send + Sync {
    /// Returns the first result, or `None` when the search produced nothing.
    async fn search_one(&self, text: &str) -> Result<Option<SearchHit>, SongError>;
}

/// Opens audio-only byte streams that songbird can play.
#[cfg(feature = "music")]
#[cfg_attr(test, mockall::automock)]
pub trait AudioStreamOpener: Send + Sync {
    /// Starts streaming `url` with `buffer_size` as the download buffer hint.
    fn open_audio_only(&self, url: &str, buffer_size: usize) -> Result<Input, MaterializeError>;
}
