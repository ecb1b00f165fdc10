//! Album Fetch - command line front end
//!
//! Fetches an album or track page and prints it as JSON.

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use album_fetch::models::FormatRef;
use album_fetch::{Config, FetchClient, GetInfoParams};

/// Fetch album and track pages as JSON
#[derive(Parser, Debug)]
#[command(name = "album_fetch", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Include the page's embedded data in the output
    #[arg(long, global = true)]
    raw: bool,

    /// Album art format, by id or name
    #[arg(long, global = true)]
    album_image_format: Option<FormatRef>,

    /// Artist picture format, by id or name
    #[arg(long, global = true)]
    artist_image_format: Option<FormatRef>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch an album page
    Album { url: String },
    /// Fetch a track page
    Track { url: String },
}

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the client (cache, sweep task, limiter, HTTP transport)
/// 4. Run the requested command and print the result
/// 5. Stop the sweep task
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "album_fetch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::from_env();
    info!(
        "Configuration loaded: page_ttl={}s, page_max_entries={:?}, sweep_interval={}s",
        config.page_ttl, config.page_max_entries, config.sweep_interval
    );

    let client = FetchClient::from_config(&config).context("failed to build HTTP client")?;

    let url = match &cli.command {
        Command::Album { url } | Command::Track { url } => url.clone(),
    };
    let params = GetInfoParams {
        url,
        album_image_format: cli.album_image_format,
        artist_image_format: cli.artist_image_format,
        include_raw_data: cli.raw,
    };

    let output = match cli.command {
        Command::Album { .. } => {
            let album = client
                .album()
                .get_info(&params)
                .await
                .with_context(|| format!("failed to fetch album {}", params.url))?;
            serde_json::to_string_pretty(&album)?
        }
        Command::Track { .. } => {
            let track = client
                .track()
                .get_info(&params)
                .await
                .with_context(|| format!("failed to fetch track {}", params.url))?;
            serde_json::to_string_pretty(&track)?
        }
    };
    println!("{}", output);

    client.shutdown().await;
    Ok(())
}
