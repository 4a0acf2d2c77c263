//! Song resolution and playback plumbing for the Rusty Tunes Discord bot.
//!
//! A [`Song`] is resolved from a URL or search term by a [`SongResolver`],
//! turned into a playable songbird track by a `ResourceMaterializer` (feature
//! `music`), and announced with [`Song::start_message`].

/// Runtime knobs for the external tools and services.
pub mod config;
/// Embedded locale catalogs for user-facing messages.
pub mod i18n;
/// The `Song` value object and everything that produces or consumes it.
pub mod song;

pub use config::SongConfig;
pub use i18n::Catalog;
#[cfg(feature = "music")]
pub use song::resource::{AudioResource, MaterializeError, ResourceMaterializer};
pub use song::{Song, SongError, SongResolver};
