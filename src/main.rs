//! url-pull
//!
//! Stage one of the video pipeline: fetch the recent short videos of a channel
//! from the YouTube Data API and save them as JSON for the download stage.
//!
//! # Usage
//!
//! ```bash
//! url-pull fetch --channel-id UC-tE4p-L9f0-w1T1-v8a-qA --days 365 --max-duration 4m
//! url-pull show --input youtube_videos.json --format yaml
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use url_pull::adapters::JsonFileStore;
use url_pull::cli::{commands, Cli, Commands};
use url_pull::utils::{LogFormat, LogLevel, LoggingConfig};

/// Main entry point for the url-pull CLI
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig {
        level: LogLevel::parse(&cli.log_level)?,
        format: if cli.json_logs {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        },
    }
    .init();

    info!("Starting url-pull");

    match cli.command {
        Commands::Fetch(args) => {
            info!("Executing fetch command");
            commands::fetch(args).await?;
        }
        Commands::Show(args) => {
            info!("Executing show command");
            commands::show(args, &JsonFileStore::new())?;
        }
    }

    info!("url-pull completed successfully");
    Ok(())
}
