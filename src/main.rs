use ::serenity::all::ClientBuilder;
use dotenv::dotenv;
use poise::serenity_prelude as serenity;
use rusty_tunes::song::sources::{VideoSearcher, youtube_api::YoutubeDataApi, ytdlp::YtDlp};
use rusty_tunes::{Catalog, SongConfig, SongResolver};
use std::env;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[cfg(feature = "music")]
use rusty_tunes::ResourceMaterializer;

mod commands;

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;
type CommandResult = Result<(), Error>;

/// Shared state available to every command invocation.
#[cfg_attr(not(feature = "music"), allow(dead_code))]
struct Data {
    resolver: SongResolver,
    #[cfg(feature = "music")]
    materializer: ResourceMaterializer,
    catalog: Catalog,
}

impl Data {
    fn from_config(config: &SongConfig) -> Result<Self, Error> {
        let ytdlp = Arc::new(YtDlp::new(config.ytdlp_path.clone()));

        let searcher: Arc<dyn VideoSearcher> = match &config.youtube_api_key {
            Some(api_key) => {
                info!("Searching through the YouTube Data API");
                Arc::new(YoutubeDataApi::new(
                    reqwest::Client::new(),
                    config.youtube_api_base.clone(),
                    api_key.clone(),
                ))
            }
            None => {
                info!("YOUTUBE_API_KEY not set, searching through {}", ytdlp.program());
                ytdlp.clone()
            }
        };

        let catalog = Catalog::load_or_default(&config.locale)?;
        info!("Replying in locale {}", catalog.locale());

        #[cfg(feature = "music")]
        let materializer = ResourceMaterializer::new(ytdlp.clone(), config.stream_buffer_bytes);
        #[cfg(feature = "music")]
        info!("Streaming with a {} byte buffer", materializer.buffer_size());

        Ok(Data {
            resolver: SongResolver::new(ytdlp, searcher, config.lookup_timeout),
            #[cfg(feature = "music")]
            materializer,
            catalog,
        })
    }
}

#[poise::command(slash_command, category = "General")]
async fn help(
    ctx: Context<'_>,
    #[description = "Specific command to show help about"]
    #[autocomplete = "poise::builtins::autocomplete_command"]
    command: Option<String>,
) -> CommandResult {
    poise::builtins::help(
        ctx,
        command.as_deref(),
        poise::builtins::HelpConfiguration {
            show_context_menu_commands: true,
            ..Default::default()
        },
    )
    .await
    .map_err(|e| e.into())
}

#[poise::command(prefix_command, hide_in_help)]
async fn register(ctx: Context<'_>) -> Result<(), Error> {
    poise::builtins::register_application_commands_buttons(ctx)
        .await
        .map_err(|e| e.into())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize logging with debug level for our crate
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rusty_tunes=debug,warn")),
        )
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_target(true)
        .with_ansi(true)
        .pretty()
        .init();

    dotenv().ok();

    let token = env::var("DISCORD_TOKEN").map_err(|_| "Missing DISCORD_TOKEN")?;

    let config = SongConfig::from_env();
    info!("Loaded configuration: {:?}", redacted(&config));
    let data = Data::from_config(&config)?;

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::GUILD_VOICE_STATES;

    #[allow(unused_mut)]
    let mut commands = vec![
        // Default commands
        register(),
        help(),
    ];

    // Handle Music feature
    #[cfg(feature = "music")]
    {
        use commands::music::{leave::*, play::*};

        commands.extend(vec![play(), leave()]);
    }

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands,
            ..Default::default()
        })
        .setup(|ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        });

    let client_builder = ClientBuilder::new(token, intents).framework(framework.build());

    // Create and run client
    build_and_start_client(client_builder).await
}

/// Configuration with the API key masked, for logging.
fn redacted(config: &SongConfig) -> SongConfig {
    SongConfig {
        youtube_api_key: config.youtube_api_key.as_ref().map(|_| "***".to_string()),
        ..config.clone()
    }
}

async fn build_and_start_client(client_builder: ClientBuilder) -> Result<(), Error> {
    #[cfg(feature = "music")]
    {
        use songbird::SerenityInit;

        let mut client = client_builder.register_songbird().await?;
        client.start().await.map_err(Into::into)
    }

    #[cfg(not(feature = "music"))]
    {
        let mut client = client_builder.await?;
        client.start().await.map_err(Into::into)
    }
}
