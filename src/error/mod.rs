//! Error handling module for url-pull

use thiserror::Error;

use crate::domain::errors::{DomainError, FetchError};

/// Main error type for url-pull operations
#[derive(Error, Debug)]
pub enum UrlPullError {
    /// No API credential in any configuration layer
    #[error("YouTube Data API key not found. Set YOUTUBE_API_KEY or api_key in the config file")]
    MissingApiKey,

    /// Configuration value could not be used
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// Configuration file could not be parsed
    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Rejected input value
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Fetch run failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Summary rendering failed
    #[error("Failed to render output: {message}")]
    Render { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for url-pull operations
pub type UrlPullResult<T> = std::result::Result<T, UrlPullError>;
