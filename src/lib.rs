//! url-pull library
//!
//! Stage one of the video pipeline: pulls the list of a channel's videos from
//! the YouTube Data API search endpoint, following page tokens until the
//! listing is exhausted.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod output;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::ChannelVideoFetcher;
pub use domain::errors::{DomainError, FetchError};
pub use domain::model::{
    ChannelId, DurationClass, FetchQuery, MaxDuration, PageSize, ResultSet, SearchPage,
    TimeWindow, VideoRecord,
};
pub use error::{UrlPullError, UrlPullResult};
pub use ports::{ProgressPort, ResultStorePort, SearchPort};
