//! Sample lookup data used across the integration tests

use rusty_tunes::song::sources::VideoDetails;

/// A video link exactly as a user would paste it
pub const VIDEO_URL: &str = "https://youtube.com/watch?v=abc123";

/// The canonical form the lookup service reports for `VIDEO_URL`
pub const CANONICAL_VIDEO_URL: &str = "https://www.youtube.com/watch?v=abc123";

/// Video id returned by the search service for `SEARCH_TERM`
pub const SEARCH_VIDEO_ID: &str = "jfKfPfyJRdk";

pub const SEARCH_TERM: &str = "lofi hip hop radio";

/// Watch URL derived from `SEARCH_VIDEO_ID`
pub const SEARCH_WATCH_URL: &str = "https://youtube.com/watch?v=jfKfPfyJRdk";

pub fn video_details() -> VideoDetails {
    VideoDetails {
        url: CANONICAL_VIDEO_URL.to_string(),
        title: "Lofi Beats".to_string(),
        duration_in_sec: "185".to_string(),
    }
}

pub fn search_video_details() -> VideoDetails {
    VideoDetails {
        url: SEARCH_WATCH_URL.to_string(),
        title: "lofi hip hop radio - beats to relax/study to".to_string(),
        duration_in_sec: "3725.9".to_string(),
    }
}
