//! Logging configuration and subscriber setup

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::domain::errors::DomainError;

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// General information
    Info,
    /// Debug information
    Debug,
    /// Very verbose debug information
    Trace,
}

impl LogLevel {
    /// Parse log level from string
    pub fn parse(level_str: &str) -> Result<Self, DomainError> {
        match level_str.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
                level_str
            ))),
        }
    }

    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogFormat {
    /// Human-readable text format
    Pretty,
    /// JSON format for structured logging
    Json,
}

/// Logging configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig {
    /// Filter from `RUST_LOG` when set, otherwise from the configured level
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.as_directive()))
    }

    /// Install the global subscriber. Logs go to stderr so stdout stays clean.
    ///
    /// Calling it twice is harmless; the second call keeps the first subscriber.
    pub fn init(&self) {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(self.env_filter())
            .with_writer(std::io::stderr)
            .with_target(false);

        let _ = match self.format {
            LogFormat::Pretty => builder.try_init(),
            LogFormat::Json => builder.json().try_init(),
        };
    }
}
