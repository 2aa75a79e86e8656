//! Command-line argument definitions

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;

use crate::config_initialization::CliOverrides;
use crate::domain::model::{TimeWindow, MAX_PAGE_SIZE};

/// Arguments for the fetch command
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Channel identifier
    #[arg(short, long)]
    pub channel_id: Option<String>,

    /// YouTube Data API key
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Look back this many days from now
    #[arg(short, long, conflicts_with = "after")]
    pub days: Option<u32>,

    /// Only videos published after this RFC 3339 timestamp
    #[arg(long, value_parser = parse_timestamp)]
    pub after: Option<DateTime<Utc>>,

    /// Only videos published before this RFC 3339 timestamp (default: now)
    #[arg(long, value_parser = parse_timestamp)]
    pub before: Option<DateTime<Utc>>,

    /// Maximum video duration (240, 4m, 04:00)
    #[arg(short, long)]
    pub max_duration: Option<String>,

    /// Results per request
    #[arg(short, long, value_parser = page_size_range)]
    pub page_size: Option<u32>,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file (default: url_pull.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the video summary after fetching
    #[arg(long)]
    pub summary: bool,
}

impl FetchArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            api_key: self.api_key.clone(),
            channel_id: self.channel_id.clone(),
            days: self.days,
            published_after: self.after,
            published_before: self.before,
            max_duration: self.max_duration.clone(),
            page_size: self.page_size,
            output: self.output.clone(),
        }
    }
}

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Saved video list
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output format (text, json, yaml)
    #[arg(long, default_value = "text")]
    pub format: String,
}

fn page_size_range(s: &str) -> Result<u32, String> {
    clap_num::number_range(s, 1, MAX_PAGE_SIZE)
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    TimeWindow::parse_bound(s).map_err(|e| e.to_string())
}
