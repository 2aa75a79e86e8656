//! CLI module for url-pull
//!
//! This module handles command-line argument parsing and command execution.

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

pub use args::{FetchArgs, ShowArgs};

/// Stage one of the video pipeline
///
/// Pulls the list of a channel's recent short videos from the YouTube Data
/// API and stores it for the download stage.
#[derive(Parser, Debug)]
#[command(name = "url-pull")]
#[command(about = "Pull a channel's video list from the YouTube Data API")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (overridden by RUST_LOG)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch all matching videos of a channel and save them
    Fetch(args::FetchArgs),
    /// Print the summary of a saved video list
    Show(args::ShowArgs),
}
