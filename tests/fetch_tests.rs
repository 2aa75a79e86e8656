//! Fetch loop tests against a scripted search port

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use url_pull::*;

/// Test utilities for the fetch loop
mod test_utils {
    use super::*;

    /// Search port replaying canned responses and recording requested tokens
    pub struct ScriptedSearch {
        responses: Mutex<VecDeque<Result<SearchPage, FetchError>>>,
        pub tokens: Mutex<Vec<Option<String>>>,
    }

    impl ScriptedSearch {
        pub fn new(responses: Vec<Result<SearchPage, FetchError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                tokens: Mutex::new(Vec::new()),
            })
        }

        pub fn requested_tokens(&self) -> Vec<Option<String>> {
            self.tokens.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SearchPort for ScriptedSearch {
        async fn search_page(
            &self,
            _query: &FetchQuery,
            page_token: Option<&str>,
        ) -> Result<SearchPage, FetchError> {
            self.tokens
                .lock()
                .unwrap()
                .push(page_token.map(str::to_string));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(FetchError::Transport("script exhausted".to_string())))
        }
    }

    /// Progress port recording every event
    #[derive(Default)]
    pub struct RecordingProgress {
        pub events: Mutex<Vec<String>>,
    }

    impl ProgressPort for RecordingProgress {
        fn run_started(&self, query: &FetchQuery) {
            self.events
                .lock()
                .unwrap()
                .push(format!("start {}", query.channel_id));
        }

        fn page_fetched(&self, page: usize, on_page: usize, total: usize) {
            self.events
                .lock()
                .unwrap()
                .push(format!("page {} {} {}", page, on_page, total));
        }

        fn token_repeated(&self, token: &str) {
            self.events.lock().unwrap().push(format!("repeat {}", token));
        }

        fn run_finished(&self, total: usize) {
            self.events.lock().unwrap().push(format!("finish {}", total));
        }
    }

    pub fn query() -> FetchQuery {
        let start = Utc.with_ymd_and_hms(2024, 10, 26, 0, 0, 0).unwrap();
        FetchQuery::new(
            ChannelId::new("X").unwrap(),
            TimeWindow::new(start, start + ChronoDuration::days(365)).unwrap(),
            MaxDuration::parse("4m").unwrap(),
            PageSize::new(50).unwrap(),
        )
    }

    pub fn videos(prefix: &str, count: usize) -> Vec<VideoRecord> {
        (0..count)
            .map(|i| {
                let id = format!("{}-{}", prefix, i);
                VideoRecord {
                    video_url: VideoRecord::watch_url(&id),
                    title: format!("Video {}", id),
                    video_id: id,
                    published_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
                    duration: DurationClass::Short,
                    description: String::new(),
                    channel_title: "X".to_string(),
                    thumbnail_url: String::new(),
                }
            })
            .collect()
    }

    pub fn page(items: Vec<VideoRecord>, token: Option<&str>) -> Result<SearchPage, FetchError> {
        Ok(SearchPage {
            items,
            next_page_token: token.map(str::to_string),
        })
    }
}

use test_utils::*;

#[tokio::test]
async fn test_two_pages_are_accumulated_in_arrival_order() {
    let search = ScriptedSearch::new(vec![
        page(videos("p1", 50), Some("abc")),
        page(videos("p2", 25), None),
    ]);
    let fetcher = ChannelVideoFetcher::silent(search.clone());

    let result = fetcher.fetch(&query()).await.unwrap();

    assert_eq!(result.len(), 75);
    assert_eq!(result.pages_fetched(), 2);
    assert_eq!(result.videos()[0].video_id, "p1-0");
    assert_eq!(result.videos()[49].video_id, "p1-49");
    assert_eq!(result.videos()[50].video_id, "p2-0");
    assert_eq!(result.videos()[74].video_id, "p2-24");
    assert_eq!(
        search.requested_tokens(),
        vec![None, Some("abc".to_string())]
    );
}

#[tokio::test]
async fn test_empty_first_page_returns_empty_set() {
    let search = ScriptedSearch::new(vec![page(Vec::new(), None)]);
    let fetcher = ChannelVideoFetcher::silent(search.clone());

    let result = fetcher.fetch(&query()).await.unwrap();

    assert!(result.is_empty());
    assert_eq!(search.requested_tokens(), vec![None]);
}

#[tokio::test]
async fn test_rate_limit_on_first_page_fails_the_run() {
    let search = ScriptedSearch::new(vec![Err(FetchError::RateLimit(
        "quotaExceeded".to_string(),
    ))]);
    let fetcher = ChannelVideoFetcher::silent(search);

    let result = fetcher.fetch(&query()).await;

    assert!(matches!(result, Err(FetchError::RateLimit(_))));
}

#[tokio::test]
async fn test_failure_on_later_page_discards_earlier_pages() {
    let search = ScriptedSearch::new(vec![
        page(videos("p1", 50), Some("t1")),
        page(videos("p2", 50), Some("t2")),
        Err(FetchError::Transport("HTTP 500".to_string())),
    ]);
    let fetcher = ChannelVideoFetcher::silent(search.clone());

    let result = fetcher.fetch(&query()).await;

    assert!(matches!(result, Err(FetchError::Transport(_))));
    // No retry after the failure
    assert_eq!(search.requested_tokens().len(), 3);
}

#[tokio::test]
async fn test_duplicates_across_pages_are_kept() {
    let duplicate = videos("dup", 1);
    let search = ScriptedSearch::new(vec![
        page(duplicate.clone(), Some("next")),
        page(duplicate, None),
    ]);
    let fetcher = ChannelVideoFetcher::silent(search);

    let result = fetcher.fetch(&query()).await.unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(result.videos()[0], result.videos()[1]);
}

#[tokio::test]
async fn test_repeated_token_stops_pagination() {
    let search = ScriptedSearch::new(vec![
        page(videos("a", 2), Some("loop")),
        page(videos("b", 2), Some("loop")),
        page(videos("c", 2), None),
    ]);
    let progress = Arc::new(RecordingProgress::default());
    let fetcher = ChannelVideoFetcher::new(search.clone(), progress.clone());

    let result = fetcher.fetch(&query()).await.unwrap();

    assert_eq!(result.len(), 4);
    assert_eq!(
        search.requested_tokens(),
        vec![None, Some("loop".to_string())]
    );
    assert!(progress
        .events
        .lock()
        .unwrap()
        .contains(&"repeat loop".to_string()));
}

#[tokio::test]
async fn test_repeated_runs_are_independent() {
    let run = || {
        vec![
            page(videos("p1", 3), Some("abc")),
            page(videos("p2", 2), None),
        ]
    };
    let mut script = run();
    script.extend(run());
    let search = ScriptedSearch::new(script);
    let fetcher = ChannelVideoFetcher::silent(search.clone());

    let first = fetcher.fetch(&query()).await.unwrap();
    let second = fetcher.fetch(&query()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        search.requested_tokens(),
        vec![None, Some("abc".to_string()), None, Some("abc".to_string())]
    );
}

#[tokio::test]
async fn test_progress_events() {
    let search = ScriptedSearch::new(vec![
        page(videos("p1", 2), Some("abc")),
        page(videos("p2", 1), None),
    ]);
    let progress = Arc::new(RecordingProgress::default());
    let fetcher = ChannelVideoFetcher::new(search, progress.clone());

    fetcher.fetch(&query()).await.unwrap();

    assert_eq!(
        *progress.events.lock().unwrap(),
        vec![
            "start X".to_string(),
            "page 1 2 2".to_string(),
            "page 2 1 3".to_string(),
            "finish 3".to_string(),
        ]
    );
}
