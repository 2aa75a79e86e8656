use std::sync::Arc;

use crate::adapters::{JsonFileStore, TracingProgressAdapter, YouTubeSearchAdapter};
use crate::app::fetch_interactor::ChannelVideoFetcher;
use crate::config_initialization::Settings;
use crate::error::UrlPullResult;
use crate::ports::{ProgressPort, ResultStorePort, SearchPort};

pub trait AppContainer: Send + Sync {
    fn fetcher(&self) -> Arc<ChannelVideoFetcher>;
    fn result_store(&self) -> Arc<dyn ResultStorePort>;
}

pub struct DefaultAppContainer {
    fetcher: Arc<ChannelVideoFetcher>,
    result_store: Arc<dyn ResultStorePort>,
}

impl DefaultAppContainer {
    /// Wire the production adapters from resolved settings
    pub fn new(settings: &Settings) -> UrlPullResult<Self> {
        let api_key = settings.require_api_key()?.to_string();
        let search_port = Arc::new(YouTubeSearchAdapter::with_base_url(
            api_key,
            &settings.api_base_url,
            settings.timeout(),
        )?);
        let progress_port = Arc::new(TracingProgressAdapter::new());

        Ok(Self::with_ports(
            search_port as Arc<dyn SearchPort>,
            progress_port as Arc<dyn ProgressPort>,
            Arc::new(JsonFileStore::new()) as Arc<dyn ResultStorePort>,
        ))
    }

    /// Container over arbitrary ports
    pub fn with_ports(
        search_port: Arc<dyn SearchPort>,
        progress_port: Arc<dyn ProgressPort>,
        result_store: Arc<dyn ResultStorePort>,
    ) -> Self {
        Self {
            fetcher: Arc::new(ChannelVideoFetcher::new(search_port, progress_port)),
            result_store,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn fetcher(&self) -> Arc<ChannelVideoFetcher> {
        Arc::clone(&self.fetcher)
    }

    fn result_store(&self) -> Arc<dyn ResultStorePort> {
        Arc::clone(&self.result_store)
    }
}
