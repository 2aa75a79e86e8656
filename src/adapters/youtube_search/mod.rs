// YouTube search adapter - Search port backed by the YouTube Data API v3

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Base URL of the YouTube Data API v3
pub const YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Error reasons that mean the credential is unusable
const AUTH_REASONS: &[&str] = &[
    "keyInvalid",
    "keyExpired",
    "forbidden",
    "accessNotConfigured",
    "ipRefererBlocked",
    "authError",
];

/// Error reasons that mean a quota is exhausted
const QUOTA_REASONS: &[&str] = &[
    "quotaExceeded",
    "dailyLimitExceeded",
    "rateLimitExceeded",
    "userRateLimitExceeded",
];

/// Search port implementation issuing `search.list` requests
pub struct YouTubeSearchAdapter {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeSearchAdapter {
    /// Create an adapter against the public endpoint
    pub fn new(api_key: String) -> Result<Self, FetchError> {
        Self::with_base_url(api_key, YOUTUBE_API_URL, DEFAULT_TIMEOUT)
    }

    /// Create an adapter against a custom base URL
    pub fn with_base_url(
        api_key: String,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        if api_key.trim().is_empty() {
            return Err(FetchError::Auth("API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        debug!("YouTube search client initialized for {}", base_url);

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Query parameters for one page request
    fn query_params(&self, query: &FetchQuery, page_token: Option<&str>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("part", "snippet".to_string()),
            ("channelId", query.channel_id.as_str().to_string()),
            ("publishedAfter", query.window.published_after()),
            ("publishedBefore", query.window.published_before()),
            ("videoDuration", query.duration_class().as_api_str().to_string()),
            ("type", RESULT_TYPE.to_string()),
            ("maxResults", query.page_size.get().to_string()),
            ("order", RESULT_ORDER.to_string()),
            ("key", self.api_key.clone()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }
        params
    }
}

#[async_trait]
impl SearchPort for YouTubeSearchAdapter {
    async fn search_page(
        &self,
        query: &FetchQuery,
        page_token: Option<&str>,
    ) -> Result<SearchPage, FetchError> {
        let url = format!("{}/search", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&self.query_params(query, page_token))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let err = classify_api_error(status.as_u16(), &body);
            warn!(status = status.as_u16(), kind = err.kind(), "Search request rejected");
            return Err(err);
        }

        parse_search_page(&body, query.duration_class())
    }
}

fn transport_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Transport(format!("Request timed out: {}", err))
    } else {
        FetchError::Transport(err.to_string())
    }
}

/// Map a non-success response onto the fetch error taxonomy
pub fn classify_api_error(status: u16, body: &str) -> FetchError {
    let api_error = serde_json::from_str::<ApiErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error);

    let detail = api_error
        .as_ref()
        .map(|e| e.message.clone())
        .filter(|m| !m.is_empty());
    let message = detail.clone().unwrap_or_else(|| format!("HTTP {}", status));

    let has_reason = |wanted: &[&str]| {
        api_error
            .as_ref()
            .map(|e| e.errors.iter().any(|d| wanted.contains(&d.reason.as_str())))
            .unwrap_or(false)
    };
    let api_status = api_error
        .as_ref()
        .and_then(|e| e.status.as_deref())
        .unwrap_or("");

    match status {
        401 => FetchError::Auth(message),
        429 => FetchError::RateLimit(message),
        400 | 403 if has_reason(QUOTA_REASONS) || api_status == "RESOURCE_EXHAUSTED" => {
            FetchError::RateLimit(message)
        }
        400 | 403 if has_reason(AUTH_REASONS) || api_status == "PERMISSION_DENIED" => {
            FetchError::Auth(message)
        }
        403 if message.to_lowercase().contains("quota") => FetchError::RateLimit(message),
        403 => FetchError::Auth(message),
        _ => match detail {
            Some(detail) => FetchError::Transport(format!("HTTP {}: {}", status, detail)),
            None => FetchError::Transport(message),
        },
    }
}

/// Decode a successful `search.list` body into a page
pub fn parse_search_page(body: &str, duration: DurationClass) -> Result<SearchPage, FetchError> {
    let response: SearchListResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::ResponseFormat(format!("Body is not a search listing: {}", e)))?;

    let items = response
        .items
        .ok_or_else(|| FetchError::ResponseFormat("Response has no item list".to_string()))?;

    let videos = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| item.into_record(index, duration))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SearchPage {
        items: videos,
        next_page_token: response.next_page_token.filter(|t| !t.is_empty()),
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchListResponse {
    #[serde(default)]
    items: Option<Vec<SearchResult>>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: Option<ResourceId>,
    snippet: Option<Snippet>,
}

impl SearchResult {
    fn into_record(self, index: usize, duration: DurationClass) -> Result<VideoRecord, FetchError> {
        let video_id = self
            .id
            .and_then(|id| id.video_id)
            .ok_or_else(|| FetchError::ResponseFormat(format!("Item {} has no video id", index)))?;
        let snippet = self
            .snippet
            .ok_or_else(|| FetchError::ResponseFormat(format!("Item {} has no snippet", index)))?;

        Ok(VideoRecord {
            video_url: VideoRecord::watch_url(&video_id),
            video_id,
            title: snippet.title,
            published_at: snippet.published_at,
            duration,
            description: snippet.description,
            channel_title: snippet.channel_title,
            thumbnail_url: snippet
                .thumbnails
                .default
                .map(|t| t.url)
                .unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    published_at: DateTime<Utc>,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    reason: String,
}
