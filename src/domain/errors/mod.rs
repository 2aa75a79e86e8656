// Domain errors - Error types for the domain layer

use std::fmt;

/// Errors raised while building or validating domain values
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// Invalid time window
    InvalidTimeWindow(String),
    /// Page size outside the accepted bounds
    InvalidPageSize(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::InvalidTimeWindow(msg) => write!(f, "Invalid time window: {}", msg),
            DomainError::InvalidPageSize(msg) => write!(f, "Invalid page size: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

/// Failures of a fetch run. Every variant is fatal for the run.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Invalid or missing API credential
    Auth(String),
    /// Daily or per-user quota exhausted
    RateLimit(String),
    /// Network or HTTP level failure
    Transport(String),
    /// Page body did not carry the fields we consume
    ResponseFormat(String),
}

impl FetchError {
    /// Short machine-friendly name of the error class
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Auth(_) => "auth",
            FetchError::RateLimit(_) => "rate_limit",
            FetchError::Transport(_) => "transport",
            FetchError::ResponseFormat(_) => "response_format",
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Auth(msg) => write!(f, "Authentication failed: {}", msg),
            FetchError::RateLimit(msg) => write!(
                f,
                "Quota exceeded: {} (wait for the daily quota reset before retrying)",
                msg
            ),
            FetchError::Transport(msg) => write!(f, "Transport error: {}", msg),
            FetchError::ResponseFormat(msg) => write!(f, "Unexpected response format: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}
