use super::*;
use crate::commands::music::utils::{
    embedded_messages,
    voice::{MusicError, VoiceManager},
};
use tracing::{info, warn};

/// Leave the voice channel
#[poise::command(slash_command, guild_only, category = "Music")]
pub async fn leave(ctx: Context<'_>) -> CommandResult {
    let guild_id = ctx.guild_id().ok_or_else(|| {
        Box::new(MusicError::NotInGuild) as Box<dyn std::error::Error + Send + Sync>
    })?;
    let catalog = &ctx.data().catalog;

    // Try to leave the voice channel
    match VoiceManager::leave_channel(ctx.serenity_context(), guild_id).await {
        Ok(_) => {
            info!("Left voice channel in guild {}", guild_id);
            ctx.send(embedded_messages::left_voice_channel(catalog))
                .await?;
        }
        Err(err) => {
            warn!("Failed to leave voice channel in guild {}: {}", guild_id, err);
            ctx.send(embedded_messages::failed_to_leave_voice_channel(&err, catalog))
                .await?;
        }
    }

    Ok(())
}
