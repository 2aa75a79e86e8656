// Tracing progress adapter - Console reporting of fetch runs via tracing

use tracing::{info, warn};

use crate::domain::model::FetchQuery;
use crate::ports::ProgressPort;

/// Progress adapter emitting structured tracing events
#[derive(Debug, Default)]
pub struct TracingProgressAdapter;

impl TracingProgressAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressPort for TracingProgressAdapter {
    fn run_started(&self, query: &FetchQuery) {
        info!(channel = %query.channel_id, "Fetching videos from channel");
        info!(window = %query.window, "Date range");
        info!(
            max_duration = %query.max_duration,
            duration_class = %query.duration_class(),
            page_size = query.page_size.get(),
            "Duration filter"
        );
    }

    fn page_fetched(&self, page: usize, on_page: usize, total: usize) {
        info!(page, on_page, total, "Fetched page {}: {} videos, {} so far", page, on_page, total);
    }

    fn token_repeated(&self, token: &str) {
        warn!(token, "Page token returned twice, stopping pagination");
    }

    fn run_finished(&self, total: usize) {
        info!(total, "Completed! Total videos fetched: {}", total);
    }
}
