// Domain models - Core types and data structures

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::domain::errors::DomainError;


/// Largest page the search endpoint accepts
pub const MAX_PAGE_SIZE: u32 = 50;

/// Result type restriction sent with every search request
pub const RESULT_TYPE: &str = "video";

/// Result ordering sent with every search request (newest first)
pub const RESULT_ORDER: &str = "date";

/// Wire format for publication-time bounds
const RFC3339_SECONDS: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Opaque identifier of a channel on the video platform
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(String);

impl ChannelId {
    /// Create a channel id, rejecting blank input
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(DomainError::BadArgs(
                "Channel identifier cannot be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Publication-time window, start strictly before end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// Create a window from explicit bounds
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, DomainError> {
        if start >= end {
            return Err(DomainError::InvalidTimeWindow(format!(
                "start ({}) must be before end ({})",
                start.format(RFC3339_SECONDS),
                end.format(RFC3339_SECONDS)
            )));
        }
        Ok(Self { start, end })
    }

    /// Window covering the `days` days that end at `now`
    pub fn last_days(days: u32, now: DateTime<Utc>) -> Result<Self, DomainError> {
        if days == 0 {
            return Err(DomainError::InvalidTimeWindow(
                "Window must span at least one day".to_string(),
            ));
        }
        let start = now
            .checked_sub_signed(ChronoDuration::days(i64::from(days)))
            .ok_or_else(|| {
                DomainError::InvalidTimeWindow(format!("{} days reaches past the earliest date", days))
            })?;
        Self::new(start, now)
    }

    /// Parse an RFC 3339 timestamp as used on the command line
    pub fn parse_bound(value: &str) -> Result<DateTime<Utc>, DomainError> {
        DateTime::parse_from_rfc3339(value.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                DomainError::InvalidTimeWindow(format!("'{}' is not RFC 3339: {}", value, e))
            })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Lower bound in the format the search endpoint expects
    pub fn published_after(&self) -> String {
        self.start.format(RFC3339_SECONDS).to_string()
    }

    /// Upper bound in the format the search endpoint expects
    pub fn published_before(&self) -> String {
        self.end.format(RFC3339_SECONDS).to_string()
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.published_after(), self.published_before())
    }
}

/// Categorical duration filter sent to the search endpoint
///
/// The endpoint also knows `medium` and `long`, but neither has an upper
/// bound a maximum duration can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationClass {
    /// No duration restriction
    Any,
    /// Shorter than four minutes
    Short,
}

impl DurationClass {
    /// Upper bound of the short class
    pub const SHORT_LIMIT: Duration = Duration::from_secs(4 * 60);

    /// Value of the `videoDuration` query parameter
    pub fn as_api_str(&self) -> &'static str {
        match self {
            DurationClass::Any => "any",
            DurationClass::Short => "short",
        }
    }
}

impl fmt::Display for DurationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str())
    }
}

/// Maximum item duration requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MaxDuration(Duration);

impl MaxDuration {
    /// Create a max duration, rejecting zero
    pub fn new(duration: Duration) -> Result<Self, DomainError> {
        if duration.is_zero() {
            return Err(DomainError::BadArgs(
                "Maximum duration must be greater than zero".to_string(),
            ));
        }
        Ok(Self(duration))
    }

    pub fn from_secs(secs: u64) -> Result<Self, DomainError> {
        Self::new(Duration::from_secs(secs))
    }

    /// Parse a time span in various formats
    ///
    /// Accepted: plain seconds (`240`), suffixed (`90s`, `4m`, `1h`),
    /// `MM:SS` and `HH:MM:SS`.
    pub fn parse(span: &str) -> Result<Self, DomainError> {
        let trimmed = span.trim();
        if trimmed.is_empty() {
            return Err(DomainError::BadArgs("Duration cannot be empty".to_string()));
        }

        if let Ok(secs) = trimmed.parse::<u64>() {
            return Self::from_secs(secs);
        }

        let suffixed = [("h", 3600u64), ("m", 60), ("s", 1)];
        for (suffix, factor) in suffixed {
            if let Some(number) = trimmed.strip_suffix(suffix) {
                let value = number.trim().parse::<u64>().map_err(|_| {
                    DomainError::BadArgs(format!("Invalid duration value: {}", trimmed))
                })?;
                let secs = value.checked_mul(factor).ok_or_else(|| too_long(trimmed))?;
                return Self::from_secs(secs);
            }
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        let parse_part = |part: &str, name: &str| {
            part.parse::<u64>()
                .map_err(|_| DomainError::BadArgs(format!("Invalid {} in duration: {}", name, trimmed)))
        };
        let secs = match parts[..] {
            [minutes, seconds] => {
                let seconds = parse_part(seconds, "seconds")?;
                if seconds >= 60 {
                    return Err(DomainError::BadArgs("Seconds must be less than 60".to_string()));
                }
                parse_part(minutes, "minutes")?
                    .checked_mul(60)
                    .and_then(|m| m.checked_add(seconds))
                    .ok_or_else(|| too_long(trimmed))?
            }
            [hours, minutes, seconds] => {
                let minutes = parse_part(minutes, "minutes")?;
                let seconds = parse_part(seconds, "seconds")?;
                if minutes >= 60 {
                    return Err(DomainError::BadArgs("Minutes must be less than 60".to_string()));
                }
                if seconds >= 60 {
                    return Err(DomainError::BadArgs("Seconds must be less than 60".to_string()));
                }
                parse_part(hours, "hours")?
                    .checked_mul(3600)
                    .and_then(|h| h.checked_add(minutes * 60 + seconds))
                    .ok_or_else(|| too_long(trimmed))?
            }
            _ => {
                return Err(DomainError::BadArgs(format!(
                    "Invalid duration format: {}. Supported formats: seconds (240), suffixed (4m, 90s, 1h), MM:SS, HH:MM:SS",
                    trimmed
                )))
            }
        };
        Self::from_secs(secs)
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    /// Narrowest duration class that does not admit items at or above the maximum
    ///
    /// Only the short class has an upper bound, so any maximum above four
    /// minutes maps to `Any`.
    pub fn duration_class(&self) -> DurationClass {
        if self.0 <= DurationClass::SHORT_LIMIT {
            DurationClass::Short
        } else {
            DurationClass::Any
        }
    }
}

fn too_long(span: &str) -> DomainError {
    DomainError::BadArgs(format!("Duration is too large: {}", span))
}

impl fmt::Display for MaxDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.as_secs();
        let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
        if hours > 0 {
            write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            write!(f, "{:02}:{:02}", minutes, seconds)
        }
    }
}

/// Number of items requested per page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(u32);

impl PageSize {
    pub fn new(size: u32) -> Result<Self, DomainError> {
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(DomainError::InvalidPageSize(format!(
                "{} is outside 1..={}",
                size, MAX_PAGE_SIZE
            )));
        }
        Ok(Self(size))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(MAX_PAGE_SIZE)
    }
}

/// Parameters of one fetch run
#[derive(Debug, Clone, PartialEq)]
pub struct FetchQuery {
    pub channel_id: ChannelId,
    pub window: TimeWindow,
    pub max_duration: MaxDuration,
    pub page_size: PageSize,
}

impl FetchQuery {
    pub fn new(
        channel_id: ChannelId,
        window: TimeWindow,
        max_duration: MaxDuration,
        page_size: PageSize,
    ) -> Self {
        Self {
            channel_id,
            window,
            max_duration,
            page_size,
        }
    }

    /// Duration filter sent to the search endpoint
    pub fn duration_class(&self) -> DurationClass {
        self.max_duration.duration_class()
    }
}

/// One video returned by the search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub video_id: String,
    pub title: String,
    pub published_at: DateTime<Utc>,
    /// Duration class the query constrained this item to
    pub duration: DurationClass,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub thumbnail_url: String,
    pub video_url: String,
}

impl VideoRecord {
    /// Public watch URL for a video id
    pub fn watch_url(video_id: &str) -> String {
        format!("https://www.youtube.com/watch?v={}", video_id)
    }
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchPage {
    pub items: Vec<VideoRecord>,
    /// Cursor for the following page; `None` once the listing is exhausted
    pub next_page_token: Option<String>,
}

/// Videos accumulated over one fetch run, in page-arrival order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSet {
    videos: Vec<VideoRecord>,
    pages_fetched: usize,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap videos that were stored earlier
    pub fn from_videos(videos: Vec<VideoRecord>) -> Self {
        Self {
            videos,
            pages_fetched: 0,
        }
    }

    /// Append a page's items, keeping duplicates as delivered
    pub fn append_page(&mut self, items: Vec<VideoRecord>) -> usize {
        let added = items.len();
        self.videos.extend(items);
        self.pages_fetched += 1;
        added
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    pub fn videos(&self) -> &[VideoRecord] {
        &self.videos
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VideoRecord> {
        self.videos.iter()
    }

    pub fn into_videos(self) -> Vec<VideoRecord> {
        self.videos
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a VideoRecord;
    type IntoIter = std::slice::Iter<'a, VideoRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.videos.iter()
    }
}
