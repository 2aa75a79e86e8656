//! Command implementations

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{error, info};

use crate::app::container::{AppContainer, DefaultAppContainer};
use crate::cli::args::{FetchArgs, ShowArgs};
use crate::config_initialization::initialize_configuration_hierarchy;
use crate::output::{render_summary, SummaryFormat};
use crate::ports::ResultStorePort;

/// Execute the fetch command
pub async fn fetch(args: FetchArgs) -> Result<()> {
    info!("Starting fetch operation");

    let settings = initialize_configuration_hierarchy(args.config.as_deref(), &args.overrides())
        .context("Failed to load configuration")?;
    let query = settings
        .fetch_query(Utc::now())
        .context("Invalid fetch parameters")?;
    let container = DefaultAppContainer::new(&settings)?;

    let result = container.fetcher().fetch(&query).await.map_err(|e| {
        error!(kind = e.kind(), "Fetch failed: {}", e);
        anyhow::Error::new(e).context("Failed to fetch channel videos")
    })?;

    if result.is_empty() {
        println!("No videos found matching the criteria.");
        return Ok(());
    }

    if args.summary {
        print!("{}", render_summary(&result, SummaryFormat::Text)?);
    }

    container
        .result_store()
        .save(&result, &settings.output)
        .with_context(|| format!("Failed to save videos to {}", settings.output.display()))?;

    println!(
        "Successfully fetched {} videos from the channel in {} pages",
        result.len(),
        result.pages_fetched()
    );
    println!("Data saved to {}", settings.output.display());

    info!("Fetch operation completed successfully");
    Ok(())
}

/// Execute the show command
pub fn show(args: ShowArgs, store: &dyn ResultStorePort) -> Result<()> {
    info!("Starting show operation");
    info!("Input: {}", args.input.display());

    let format = SummaryFormat::parse(&args.format)?;
    let result = store
        .load(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let rendered = render_summary(&result, format)?;
    print!("{}", rendered);
    if !rendered.ends_with('\n') {
        println!();
    }

    info!("Show operation completed successfully");
    Ok(())
}
