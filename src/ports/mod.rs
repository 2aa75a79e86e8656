// Ports - Interface definitions (contracts)

use std::path::Path;

use crate::domain::errors::*;
use crate::domain::model::*;
use async_trait::async_trait;

/// Port for the remote search endpoint
#[async_trait]
pub trait SearchPort: Send + Sync {
    /// Request one page of results. `page_token` is `None` for the first page.
    async fn search_page(
        &self,
        query: &FetchQuery,
        page_token: Option<&str>,
    ) -> Result<SearchPage, FetchError>;
}

/// Port observing the progress of a fetch run
pub trait ProgressPort: Send + Sync {
    /// A run is about to issue its first request
    fn run_started(&self, query: &FetchQuery);

    /// A page arrived and was appended
    fn page_fetched(&self, page: usize, on_page: usize, total: usize);

    /// Pagination ended because a token came back a second time
    fn token_repeated(&self, token: &str);

    /// The run completed successfully
    fn run_finished(&self, total: usize);
}

/// Progress observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressPort for NoProgress {
    fn run_started(&self, _query: &FetchQuery) {}
    fn page_fetched(&self, _page: usize, _on_page: usize, _total: usize) {}
    fn token_repeated(&self, _token: &str) {}
    fn run_finished(&self, _total: usize) {}
}

/// Port for persisting a result set
pub trait ResultStorePort: Send + Sync {
    /// Write the result set to `path`, replacing any previous file
    fn save(&self, result: &ResultSet, path: &Path) -> Result<(), StoreError>;

    /// Read a previously saved result set
    fn load(&self, path: &Path) -> Result<ResultSet, StoreError>;
}

/// Result store failures
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON failure: {0}")]
    Serialize(#[from] serde_json::Error),
}
