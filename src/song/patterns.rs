use regex::Regex;
use std::sync::LazyLock;

/// Links that point at a YouTube video page (scheme optional).
static VIDEO_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?(www\.)?(m\.)?(youtube\.com|youtu\.?be)/.+$").unwrap()
});

/// Any http(s) link. Deliberately looser than `VIDEO_PATTERN`.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://(www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b([-a-zA-Z0-9()@:%_+.~#?&/=]*)$",
    )
    .unwrap()
});

const WATCH_URL_PREFIX: &str = "https://youtube.com/watch?v=";

/// Checks if the input is a YouTube video link that can be looked up directly.
pub fn is_video_url(input: &str) -> bool {
    VIDEO_PATTERN.is_match(input)
}

/// Checks if the input is shaped like an http(s) link at all.
pub fn is_url(input: &str) -> bool {
    URL_PATTERN.is_match(input)
}

/// Canonical watch page for a search result's video id.
pub fn watch_url(video_id: &str) -> String {
    format!("{}{}", WATCH_URL_PREFIX, video_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("https://youtube.com/watch?v=abc123", true, true)]
    #[case("https://www.youtube.com/watch?v=dQw4w9WgXcQ", true, true)]
    #[case("https://m.youtube.com/watch?v=dQw4w9WgXcQ", true, true)]
    #[case("https://youtu.be/dQw4w9WgXcQ", true, true)]
    #[case("youtube.com/watch?v=abc123", true, false)]
    #[case("https://soundcloud.com/artist/track", false, true)]
    #[case("http://example.com/watch?v=abc", false, true)]
    #[case("https://youtube.com/", false, true)]
    #[case("not a url", false, false)]
    #[case("lofi hip hop radio", false, false)]
    #[case("", false, false)]
    fn test_classification(#[case] input: &str, #[case] video: bool, #[case] url: bool) {
        assert_eq!(is_video_url(input), video, "video pattern for {:?}", input);
        assert_eq!(is_url(input), url, "url pattern for {:?}", input);
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(watch_url("abc123"), "https://youtube.com/watch?v=abc123");
        assert!(is_video_url(&watch_url("abc123")));
    }
}
