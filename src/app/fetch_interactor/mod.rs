// Fetch interactor - Orchestrates the paginated channel fetch

use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::{NextPage, PaginationGuard};
use crate::ports::*;

/// Interactor that pulls every matching video of a channel
///
/// Requests are strictly sequential: each page depends on the token returned
/// with the previous one. The interactor keeps no state between runs.
pub struct ChannelVideoFetcher {
    search_port: Arc<dyn SearchPort>,
    progress_port: Arc<dyn ProgressPort>,
}

impl ChannelVideoFetcher {
    /// Create new fetcher with injected ports
    pub fn new(search_port: Arc<dyn SearchPort>, progress_port: Arc<dyn ProgressPort>) -> Self {
        Self {
            search_port,
            progress_port,
        }
    }

    /// Fetcher without progress reporting
    pub fn silent(search_port: Arc<dyn SearchPort>) -> Self {
        Self::new(search_port, Arc::new(NoProgress))
    }

    /// Fetch all pages for `query`
    ///
    /// Returns the whole result set once the listing is exhausted. The first
    /// failing request aborts the run and nothing accumulated so far is
    /// returned.
    pub async fn fetch(&self, query: &FetchQuery) -> Result<ResultSet, FetchError> {
        self.progress_port.run_started(query);

        let mut result = ResultSet::new();
        let mut guard = PaginationGuard::new();
        let mut page_token: Option<String> = None;

        loop {
            let page_number = result.pages_fetched() + 1;
            debug!(
                page = page_number,
                token = page_token.as_deref().unwrap_or(""),
                "Requesting search page"
            );

            let page = self
                .search_port
                .search_page(query, page_token.as_deref())
                .await
                .map_err(|e| {
                    error!(page = page_number, kind = e.kind(), "Fetch run aborted: {}", e);
                    e
                })?;

            let on_page = result.append_page(page.items);
            self.progress_port
                .page_fetched(page_number, on_page, result.len());

            match guard.advance(page.next_page_token) {
                NextPage::Continue(token) => page_token = Some(token),
                NextPage::Exhausted => break,
                NextPage::Repeated(token) => {
                    self.progress_port.token_repeated(&token);
                    break;
                }
            }
        }

        self.progress_port.run_finished(result.len());
        Ok(result)
    }
}
