// Adapters - External system implementations

pub mod json_store;
pub mod toml_config;
pub mod tracing_progress;
pub mod youtube_search;

// Re-export adapters
pub use json_store::JsonFileStore;
pub use toml_config::TomlConfigAdapter;
pub use tracing_progress::TracingProgressAdapter;
pub use youtube_search::YouTubeSearchAdapter;
