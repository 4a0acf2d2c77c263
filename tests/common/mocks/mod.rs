//! Recording fakes for the external services a song depends on

use rusty_tunes::SongError;
use rusty_tunes::song::sources::{SearchHit, VideoDetails, VideoInfoProvider, VideoSearcher};
use serenity::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Answers lookups from a fixed table and records every requested URL
#[derive(Default)]
pub struct RecordingInfoProvider {
    videos: HashMap<String, VideoDetails>,
    calls: Mutex<Vec<String>>,
}

impl RecordingInfoProvider {
    pub fn with(videos: &[(&str, VideoDetails)]) -> Self {
        Self {
            videos: videos
                .iter()
                .map(|(url, details)| (url.to_string(), details.clone()))
                .collect(),
            calls: Mutex::default(),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoInfoProvider for RecordingInfoProvider {
    async fn basic_info(&self, url: &str) -> Result<VideoDetails, SongError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.videos.get(url).cloned().ok_or_else(|| SongError::Lookup {
            url: url.to_string(),
            reason: "Video unavailable".to_string(),
        })
    }
}

/// Answers searches from a fixed table and records every search text
#[derive(Default)]
pub struct RecordingSearcher {
    hits: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl RecordingSearcher {
    pub fn with(hits: &[(&str, &str)]) -> Self {
        Self {
            hits: hits
                .iter()
                .map(|(text, id)| (text.to_string(), id.to_string()))
                .collect(),
            calls: Mutex::default(),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoSearcher for RecordingSearcher {
    async fn search_one(&self, text: &str) -> Result<Option<SearchHit>, SongError> {
        self.calls.lock().unwrap().push(text.to_string());
        Ok(self.hits.get(text).map(|id| SearchHit { id: id.clone() }))
    }
}

/// A search service that never answers in time
pub struct StalledSearcher {
    pub delay: Duration,
}

#[async_trait]
impl VideoSearcher for StalledSearcher {
    async fn search_one(&self, _text: &str) -> Result<Option<SearchHit>, SongError> {
        tokio::time::sleep(self.delay).await;
        Ok(None)
    }
}

/// A lookup service that never answers in time
pub struct StalledInfoProvider {
    pub delay: Duration,
}

#[async_trait]
impl VideoInfoProvider for StalledInfoProvider {
    async fn basic_info(&self, url: &str) -> Result<VideoDetails, SongError> {
        tokio::time::sleep(self.delay).await;
        Err(SongError::Lookup {
            url: url.to_string(),
            reason: "Video unavailable".to_string(),
        })
    }
}

#[cfg(feature = "music")]
pub use stream::RecordingOpener;

#[cfg(feature = "music")]
mod stream {
    use rusty_tunes::MaterializeError;
    use rusty_tunes::song::sources::AudioStreamOpener;
    use songbird::input::{File, Input};
    use std::sync::Mutex;

    /// Hands out a lazy placeholder input and records each request
    #[derive(Default)]
    pub struct RecordingOpener {
        calls: Mutex<Vec<(String, usize)>>,
    }

    impl RecordingOpener {
        pub fn calls(&self) -> Vec<(String, usize)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl AudioStreamOpener for RecordingOpener {
        fn open_audio_only(&self, url: &str, buffer_size: usize) -> Result<Input, MaterializeError> {
            self.calls.lock().unwrap().push((url.to_string(), buffer_size));
            Ok(File::new("/dev/null").into())
        }
    }
}
