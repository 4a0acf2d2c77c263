use super::*;
use crate::commands::music::utils::{
    embedded_messages,
    voice::{MusicError, VoiceManager},
};
use rusty_tunes::{
    AudioResource, MaterializeError, ResourceMaterializer, Song, SongError, SongResolver,
};
use tracing::{debug, error, info};

/// Why a query could not be turned into a playable resource
#[derive(Debug)]
pub(crate) enum PlayFailure {
    Unresolved(SongError),
    Unstreamable(MaterializeError, Song),
}

/// Resolves `query` and opens its audio stream without touching voice state.
pub(crate) async fn prepare(
    resolver: &SongResolver,
    materializer: &ResourceMaterializer,
    query: &str,
) -> Result<AudioResource, PlayFailure> {
    let song = resolver
        .resolve_query(query)
        .await
        .map_err(PlayFailure::Unresolved)?;

    materializer
        .materialize(&song)
        .map_err(|err| PlayFailure::Unstreamable(err, song))
}

/// Play a song from a YouTube link or a search query
///
/// Replaces whatever is currently playing in this server.
#[poise::command(slash_command, guild_only, category = "Music")]
pub async fn play(
    ctx: Context<'_>,
    #[description = "YouTube URL or search query"] query: String,
) -> CommandResult {
    info!("Received play command with query: {}", query);
    let guild_id = ctx.guild_id().ok_or_else(|| {
        Box::new(MusicError::NotInGuild) as Box<dyn std::error::Error + Send + Sync>
    })?;
    let data = ctx.data();

    // Get the user's voice channel
    let user_id = ctx.author().id;
    let channel_id =
        match VoiceManager::get_user_voice_channel(ctx.serenity_context(), guild_id, user_id) {
            Ok(channel_id) => channel_id,
            Err(err) => {
                debug!("Rejecting play for {}: {}", user_id, err);
                ctx.send(embedded_messages::not_in_voice_channel(&data.catalog))
                    .await?;
                return Ok(());
            }
        };

    // Defer the response since resolving and streaming might take time
    ctx.defer().await?;

    // Resolve and open the stream first so a failed lookup never leaves the bot in voice
    let resource = match prepare(&data.resolver, &data.materializer, &query).await {
        Ok(resource) => resource,
        Err(PlayFailure::Unresolved(err)) => {
            error!("Failed to resolve song: {}", err);
            ctx.send(embedded_messages::song_not_found(&err, &data.catalog))
                .await?;
            return Ok(());
        }
        Err(PlayFailure::Unstreamable(err, song)) => {
            error!("Failed to create audio resource: {}", err);
            ctx.send(embedded_messages::stream_failed(&err, &song, &data.catalog))
                .await?;
            return Ok(());
        }
    };
    let song = resource.song().clone();

    let call = match VoiceManager::join_channel(ctx.serenity_context(), guild_id, channel_id).await
    {
        Ok(call) => call,
        Err(err) => {
            error!("Failed to join voice channel: {}", err);
            ctx.send(embedded_messages::failed_to_join(&err, &data.catalog))
                .await?;
            return Ok(());
        }
    };

    let track_handle = {
        let mut handler = call.lock().await;
        handler.play_only(resource.into_track())
    };
    debug!("Started track {} in guild {}", track_handle.uuid(), guild_id);

    ctx.send(embedded_messages::started_playing(&song, &data.catalog))
        .await?;

    Ok(())
}
