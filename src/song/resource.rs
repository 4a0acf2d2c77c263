//! Turns a resolved [`Song`] into something songbird can play.

use songbird::input::Input;
use songbird::tracks::Track;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use super::Song;
use super::sources::AudioStreamOpener;

/// Errors that can occur while opening a song's audio stream.
#[derive(Error, Debug)]
pub enum MaterializeError {
    /// No stream path exists for the song's host.
    #[error("No audio source is available for {url}")]
    UnsupportedSource { url: String },

    /// The host is supported but the stream could not be opened.
    #[error("Failed to open audio stream for {url}: {reason}")]
    StreamOpen { url: String, reason: String },
}

/// Hosting platform a song's URL is streamed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamSource {
    Youtube,
    Unsupported,
}

impl StreamSource {
    /// Selects the source by looking for `youtube` anywhere in the URL.
    pub fn of(url: &str) -> Self {
        if url.contains("youtube") {
            StreamSource::Youtube
        } else {
            StreamSource::Unsupported
        }
    }
}

/// A live audio stream tagged with the song it plays.
pub struct AudioResource {
    input: Input,
    song: Arc<Song>,
}

impl AudioResource {
    pub fn new(input: Input, song: Song) -> Self {
        Self {
            input,
            song: Arc::new(song),
        }
    }

    pub fn song(&self) -> &Song {
        &self.song
    }

    /// Converts into a songbird track whose user data is the song,
    /// readable later through `TrackHandle::data::<Song>()`.
    pub fn into_track(self) -> Track {
        Track::new_with_data(self.input, self.song)
    }
}

impl fmt::Debug for AudioResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioResource")
            .field("song", &self.song)
            .finish_non_exhaustive()
    }
}

/// Opens audio streams for songs with a fixed buffer-size hint.
#[derive(Clone)]
pub struct ResourceMaterializer {
    opener: Arc<dyn AudioStreamOpener>,
    buffer_size: usize,
}

impl ResourceMaterializer {
    pub fn new(opener: Arc<dyn AudioStreamOpener>, buffer_size: usize) -> Self {
        Self {
            opener,
            buffer_size,
        }
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Opens an audio-only stream for `song` and wraps it with the song as metadata.
    pub fn materialize(&self, song: &Song) -> Result<AudioResource, MaterializeError> {
        match StreamSource::of(song.url()) {
            StreamSource::Youtube => {
                let input = self.opener.open_audio_only(song.url(), self.buffer_size)?;
                info!("Opened audio stream for {}", song.title());
                Ok(AudioResource::new(input, song.clone()))
            }
            StreamSource::Unsupported => {
                warn!("No audio source for {}", song.url());
                Err(MaterializeError::UnsupportedSource {
                    url: song.url().to_string(),
                })
            }
        }
    }
}
