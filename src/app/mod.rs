// Application layer - Use case interactors

pub mod container;
pub mod fetch_interactor;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer};
pub use fetch_interactor::ChannelVideoFetcher;
