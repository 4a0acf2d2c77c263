//! Configuration for song lookups and streaming.
//!
//! Every external default (buffer size, timeouts, tool paths) is spelled out
//! here instead of being left to whatever the underlying tools pick.

use serde::Deserialize;
use std::env;
use std::time::Duration;
use tracing::warn;
use url::Url;

/// Buffer-size hint handed to the audio stream opener (32 MiB).
pub const DEFAULT_STREAM_BUFFER_BYTES: usize = 1 << 25;
/// Upper bound for a single metadata lookup or search call.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(30);
/// Executable used for metadata lookups, searches, and streaming.
pub const DEFAULT_YTDLP_PATH: &str = "yt-dlp";
/// Locale used when `BOT_LOCALE` is unset or unknown.
pub const DEFAULT_LOCALE: &str = "en";
/// Base URL of the YouTube Data API.
pub const DEFAULT_YOUTUBE_API_BASE: &str = "https://www.googleapis.com";

/// Settings shared by the resolver, the materializer, and the message catalog.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SongConfig {
    /// Path or name of the `yt-dlp` executable.
    pub ytdlp_path: String,
    /// Buffer-size hint, in bytes, for audio-only download streams.
    pub stream_buffer_bytes: usize,
    /// Maximum time a single lookup may take before it is abandoned.
    #[serde(with = "humantime_serde")]
    pub lookup_timeout: Duration,
    /// Locale for user-facing messages.
    pub locale: String,
    /// API key for the YouTube Data API. Search falls back to `yt-dlp` when unset.
    pub youtube_api_key: Option<String>,
    /// Base URL of the YouTube Data API, overridable for tests.
    pub youtube_api_base: String,
}

impl Default for SongConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: DEFAULT_YTDLP_PATH.to_string(),
            stream_buffer_bytes: DEFAULT_STREAM_BUFFER_BYTES,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            locale: DEFAULT_LOCALE.to_string(),
            youtube_api_key: None,
            youtube_api_base: DEFAULT_YOUTUBE_API_BASE.to_string(),
        }
    }
}

impl SongConfig {
    /// Builds the configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Values that are present but unparseable are logged and replaced by the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let stream_buffer_bytes = parse_or_default(
            "STREAM_BUFFER_BYTES",
            lookup("STREAM_BUFFER_BYTES"),
            |raw| raw.parse::<usize>().ok().filter(|bytes| *bytes > 0),
            defaults.stream_buffer_bytes,
        );

        let lookup_timeout = parse_or_default(
            "LOOKUP_TIMEOUT",
            lookup("LOOKUP_TIMEOUT"),
            |raw| humantime_serde::re::humantime::parse_duration(raw).ok(),
            defaults.lookup_timeout,
        );

        let youtube_api_base = parse_or_default(
            "YOUTUBE_API_BASE",
            lookup("YOUTUBE_API_BASE"),
            |raw| {
                Url::parse(raw)
                    .ok()
                    .map(|_| raw.trim_end_matches('/').to_string())
            },
            defaults.youtube_api_base,
        );

        Self {
            ytdlp_path: non_blank(lookup("YTDLP_PATH")).unwrap_or(defaults.ytdlp_path),
            stream_buffer_bytes,
            lookup_timeout,
            locale: non_blank(lookup("BOT_LOCALE")).unwrap_or(defaults.locale),
            youtube_api_key: non_blank(lookup("YOUTUBE_API_KEY")),
            youtube_api_base,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or_default<T, P>(key: &str, raw: Option<String>, parse: P, default: T) -> T
where
    P: FnOnce(&str) -> Option<T>,
{
    let Some(raw) = non_blank(raw) else {
        return default;
    };

    match parse(&raw) {
        Some(value) => value,
        None => {
            warn!("Ignoring invalid value {:?} for {}, using the default", raw, key);
            default
        }
    }
}
