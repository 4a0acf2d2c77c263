//! Implements the song collaborators on top of the `yt-dlp` command-line tool.
//!
//! Metadata and search results are read from `yt-dlp -j` JSON output; audio
//! streams are the raw stdout of an audio-only download.

use serde_json::Value;
use serenity::async_trait;
use std::process::Output;
use tokio::process::Command;
use tracing::{debug, info};

use super::{SearchHit, VideoDetails, VideoInfoProvider, VideoSearcher};
use crate::song::SongError;

#[cfg(feature = "music")]
use super::AudioStreamOpener;
#[cfg(feature = "music")]
use crate::song::resource::MaterializeError;
#[cfg(feature = "music")]
use songbird::input::{ChildContainer, Input};
#[cfg(feature = "music")]
use std::process::Stdio;

/// Runs the `yt-dlp` executable found at `program`.
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: String,
}

impl YtDlp {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    async fn run(&self, args: &[&str]) -> Result<Output, String> {
        debug!("Running {} {:?}", self.program, args);
        Command::new(&self.program)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| format!("Failed to execute {}: {}", self.program, e))
    }

    /// Extracts `VideoDetails` from the JSON printed by `yt-dlp -j`.
    fn details_from_json(stdout: &str) -> Result<VideoDetails, String> {
        let metadata_json: Value = serde_json::from_str(stdout.trim())
            .map_err(|e| format!("Failed to parse video metadata: {}", e))?;

        let url = metadata_json["webpage_url"]
            .as_str()
            .ok_or_else(|| "Video metadata has no webpage_url".to_string())?
            .to_string();

        let title = metadata_json["title"].as_str().unwrap_or_default().to_string();

        let duration_in_sec = match &metadata_json["duration"] {
            Value::String(text) => text.clone(),
            // Live streams report no duration.
            Value::Null => "0".to_string(),
            other => other.to_string(),
        };

        Ok(VideoDetails {
            url,
            title,
            duration_in_sec,
        })
    }

    /// Picks the first entry with an id out of `--flat-playlist` JSON lines.
    fn first_hit(stdout: &str) -> Option<SearchHit> {
        stdout
            .lines()
            .filter_map(|line| serde_json::from_str::<Value>(line).ok())
            .find_map(|entry| {
                entry["id"]
                    .as_str()
                    .filter(|id| !id.is_empty())
                    .map(|id| SearchHit { id: id.to_string() })
            })
    }

    fn failure_reason(output: &Output) -> String {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let reason = stderr.trim();
        if reason.is_empty() {
            format!("yt-dlp exited with {}", output.status)
        } else {
            reason.to_string()
        }
    }

    /// Arguments for an audio-only download written to stdout.
    pub fn audio_only_args(url: &str, buffer_size: usize) -> Vec<String> {
        vec![
            "-f".to_string(),
            "bestaudio".to_string(),
            "--no-playlist".to_string(),
            "--quiet".to_string(),
            "--no-warnings".to_string(),
            "--buffer-size".to_string(),
            buffer_size.to_string(),
            "-o".to_string(),
            "-".to_string(),
            "--".to_string(),
            url.to_string(),
        ]
    }
}

#[async_trait]
impl VideoInfoProvider for YtDlp {
    async fn basic_info(&self, url: &str) -> Result<VideoDetails, SongError> {
        info!("Fetching video info for URL: {}", url);

        let lookup_error = |reason: String| SongError::Lookup {
            url: url.to_string(),
            reason,
        };

        let output = self
            .run(&["-j", "--no-playlist", "--skip-download", "--", url])
            .await
            .map_err(lookup_error)?;

        if !output.status.success() {
            return Err(lookup_error(Self::failure_reason(&output)));
        }

        Self::details_from_json(&String::from_utf8_lossy(&output.stdout)).map_err(lookup_error)
    }
}

#[async_trait]
impl VideoSearcher for YtDlp {
    async fn search_one(&self, text: &str) -> Result<Option<SearchHit>, SongError> {
        let text = text.trim();
        if text.is_empty() {
            debug!("Skipping search for blank text");
            return Ok(None);
        }

        info!("Searching YouTube for: {}", text);
        let search_param = format!("ytsearch1:{}", text);

        let search_error = |reason: String| SongError::Search {
            search: text.to_string(),
            reason,
        };

        let output = self
            .run(&["-j", "--flat-playlist", "--", &search_param])
            .await
            .map_err(search_error)?;

        if !output.status.success() {
            return Err(search_error(Self::failure_reason(&output)));
        }

        Ok(Self::first_hit(&String::from_utf8_lossy(&output.stdout)))
    }
}

#[cfg(feature = "music")]
impl AudioStreamOpener for YtDlp {
    fn open_audio_only(&self, url: &str, buffer_size: usize) -> Result<Input, MaterializeError> {
        info!("Opening audio-only stream for URL: {}", url);

        let child = std::process::Command::new(&self.program)
            .args(Self::audio_only_args(url, buffer_size))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| MaterializeError::StreamOpen {
                url: url.to_string(),
                reason: format!("Failed to execute {}: {}", self.program, e),
            })?;

        Ok(ChildContainer::from(child).into())
    }
}
