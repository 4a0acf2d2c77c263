use poise::CreateReply;
use poise::serenity_prelude::CreateEmbed;
use rusty_tunes::{Catalog, MaterializeError, Song, SongError};

use super::voice::MusicError;

/// Create an ephemeral error embed
pub fn error(description: impl Into<String>) -> CreateReply {
    CreateReply::default()
        .embed(
            CreateEmbed::new()
                .title("❌ Error")
                .description(description)
                .color(0xff0000),
        )
        .ephemeral(true)
}

/// Create an embed for when a song starts playing
pub fn started_playing(song: &Song, catalog: &Catalog) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("🎵 Now Playing")
            .description(song.start_message(catalog))
            .field("Duration", format!("`{}`", song.duration_string()), true)
            .color(0x00ff00),
    )
}

pub fn not_in_voice_channel(catalog: &Catalog) -> CreateReply {
    error(catalog.format_message("play.errorNotChannel", &[]))
}

pub fn failed_to_join(err: &MusicError, catalog: &Catalog) -> CreateReply {
    let reason = err.to_string();
    error(catalog.format_message("play.errorJoinChannel", &[("error", reason.as_str())]))
}

pub fn song_not_found(err: &SongError, catalog: &Catalog) -> CreateReply {
    error(song_error_text(err, catalog))
}

pub fn stream_failed(err: &MaterializeError, song: &Song, catalog: &Catalog) -> CreateReply {
    error(materialize_error_text(err, song, catalog))
}

pub fn left_voice_channel(catalog: &Catalog) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .description(catalog.format_message("leave.left", &[]))
            .color(0x00ff00),
    )
}

pub fn failed_to_leave_voice_channel(err: &MusicError, catalog: &Catalog) -> CreateReply {
    error(leave_error_text(err, catalog))
}

/// User-facing text for a failed leave
pub fn leave_error_text(err: &MusicError, catalog: &Catalog) -> String {
    match err {
        MusicError::NotConnected => catalog.format_message("leave.errorNotConnected", &[]),
        other => other.to_string(),
    }
}

/// User-facing text for a resolution failure
pub fn song_error_text(err: &SongError, catalog: &Catalog) -> String {
    match err {
        SongError::NoResults { search } => {
            catalog.format_message("play.errorNoResults", &[("search", search.as_str())])
        }
        SongError::InvalidUrl { url, .. } => {
            catalog.format_message("play.errorInvalidURL", &[("url", url.as_str())])
        }
        other => {
            let reason = other.to_string();
            catalog.format_message("play.errorNotFound", &[("error", reason.as_str())])
        }
    }
}

/// User-facing text for a stream that could not be opened
pub fn materialize_error_text(err: &MaterializeError, song: &Song, catalog: &Catalog) -> String {
    match err {
        MaterializeError::UnsupportedSource { url } => {
            catalog.format_message("play.errorUnsupportedSource", &[("url", url.as_str())])
        }
        MaterializeError::StreamOpen { .. } => {
            catalog.format_message("play.errorStream", &[("title", song.title())])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog() -> Catalog {
        Catalog::load("en").unwrap()
    }

    #[test]
    fn test_no_results_text() {
        let err = SongError::NoResults {
            search: "lofi hip hop radio".to_string(),
        };
        assert_eq!(
            song_error_text(&err, &catalog()),
            "No results found for **lofi hip hop radio**"
        );
    }

    #[test]
    fn test_invalid_url_text() {
        let err = SongError::InvalidUrl {
            url: "https://vimeo.com/1".to_string(),
            search: "https://vimeo.com/1".to_string(),
        };
        assert_eq!(
            song_error_text(&err, &catalog()),
            "**https://vimeo.com/1** is not a supported link"
        );
    }

    #[test]
    fn test_other_song_errors_include_the_reason() {
        let err = SongError::Lookup {
            url: "https://youtu.be/x".to_string(),
            reason: "Video unavailable".to_string(),
        };
        assert!(song_error_text(&err, &catalog()).contains("Video unavailable"));
    }

    #[test]
    fn test_materialize_error_text() {
        let song = Song::new("https://soundcloud.com/a/b", "Track", 10).unwrap();
        let unsupported = MaterializeError::UnsupportedSource {
            url: song.url().to_string(),
        };
        let failed = MaterializeError::StreamOpen {
            url: song.url().to_string(),
            reason: "boom".to_string(),
        };

        assert_eq!(
            materialize_error_text(&unsupported, &song, &catalog()),
            "Streaming from **https://soundcloud.com/a/b** is not supported yet"
        );
        assert_eq!(
            materialize_error_text(&failed, &song, &catalog()),
            "Could not start streaming **Track**"
        );
    }

    #[test]
    fn test_leave_error_keeps_the_underlying_reason() {
        let err = MusicError::LeaveError("Dropped".to_string());

        assert_eq!(
            leave_error_text(&err, &catalog()),
            "Failed to leave voice channel: Dropped"
        );
        assert_eq!(
            leave_error_text(&MusicError::NotConnected, &catalog()),
            catalog().format_message("leave.errorNotConnected", &[])
        );
    }
}
