//! This module aggregates all the command modules for the bot.

/// Commands related to music playback (requires the `music` feature).
#[cfg(feature = "music")]
pub(crate) mod music;
