//! Configuration initialization and hierarchy management

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::adapters::toml_config::{FileSettings, TomlConfigAdapter};
use crate::adapters::youtube_search::YOUTUBE_API_URL;
use crate::domain::errors::DomainError;
use crate::domain::model::{FetchQuery, TimeWindow};
use crate::domain::rules::QueryRules;
use crate::error::{UrlPullError, UrlPullResult};

pub const DEFAULT_CHANNEL_ID: &str = "UC-tE4p-L9f0-w1T1-v8a-qA";
pub const DEFAULT_DAYS: u32 = 365;
pub const DEFAULT_MAX_DURATION: &str = "4m";
pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const DEFAULT_OUTPUT: &str = "youtube_videos.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variables and the setting each overrides
const ENV_API_KEY: &str = "YOUTUBE_API_KEY";
const ENV_CHANNEL_ID: &str = "URL_PULL_CHANNEL_ID";
const ENV_DAYS: &str = "URL_PULL_DAYS";
const ENV_MAX_DURATION: &str = "URL_PULL_MAX_DURATION";
const ENV_PAGE_SIZE: &str = "URL_PULL_PAGE_SIZE";
const ENV_OUTPUT: &str = "URL_PULL_OUTPUT";
const ENV_API_BASE_URL: &str = "URL_PULL_API_BASE_URL";
const ENV_TIMEOUT_SECS: &str = "URL_PULL_TIMEOUT_SECS";

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub channel_id: String,
    pub days: u32,
    pub published_after: Option<DateTime<Utc>>,
    pub published_before: Option<DateTime<Utc>>,
    pub max_duration: String,
    pub page_size: u32,
    pub output: PathBuf,
    pub api_base_url: String,
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            channel_id: DEFAULT_CHANNEL_ID.to_string(),
            days: DEFAULT_DAYS,
            published_after: None,
            published_before: None,
            max_duration: DEFAULT_MAX_DURATION.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            output: PathBuf::from(DEFAULT_OUTPUT),
            api_base_url: YOUTUBE_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Overrides taken from command-line flags
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub api_key: Option<String>,
    pub channel_id: Option<String>,
    pub days: Option<u32>,
    pub published_after: Option<DateTime<Utc>>,
    pub published_before: Option<DateTime<Utc>>,
    pub max_duration: Option<String>,
    pub page_size: Option<u32>,
    pub output: Option<PathBuf>,
}

impl Settings {
    /// Layer file, environment and CLI values over the defaults
    pub fn resolve<F>(file: FileSettings, env: F, cli: &CliOverrides) -> UrlPullResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();
        settings.apply_file(file)?;
        settings.apply_env(env)?;
        settings.apply_cli(cli);
        Ok(settings)
    }

    fn apply_file(&mut self, file: FileSettings) -> UrlPullResult<()> {
        if let Some(v) = file.api_key {
            self.api_key = Some(v);
        }
        if let Some(v) = file.channel_id {
            self.channel_id = v;
        }
        if let Some(v) = file.days {
            self.days = v;
        }
        if let Some(v) = file.max_duration {
            self.max_duration = v;
        }
        if let Some(v) = file.page_size {
            self.page_size = v;
        }
        if let Some(v) = file.output {
            self.output = v;
        }
        if let Some(v) = file.api_base_url {
            self.api_base_url = v;
        }
        if let Some(v) = file.timeout_secs {
            self.timeout_secs = nonzero_timeout("timeout_secs", v)?;
        }
        Ok(())
    }

    fn apply_env<F>(&mut self, env: F) -> UrlPullResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| {
            env(key).filter(|v| !v.trim().is_empty()).map(|v| {
                debug!("Found environment override: {}", key);
                v
            })
        };

        if let Some(v) = lookup(ENV_API_KEY) {
            self.api_key = Some(v.trim().to_string());
        }
        if let Some(v) = lookup(ENV_CHANNEL_ID) {
            self.channel_id = v;
        }
        if let Some(v) = lookup(ENV_DAYS) {
            self.days = parse_env_number(ENV_DAYS, &v)?;
        }
        if let Some(v) = lookup(ENV_MAX_DURATION) {
            self.max_duration = v;
        }
        if let Some(v) = lookup(ENV_PAGE_SIZE) {
            self.page_size = parse_env_number(ENV_PAGE_SIZE, &v)?;
        }
        if let Some(v) = lookup(ENV_OUTPUT) {
            self.output = PathBuf::from(v);
        }
        if let Some(v) = lookup(ENV_API_BASE_URL) {
            self.api_base_url = v;
        }
        if let Some(v) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs =
                nonzero_timeout(ENV_TIMEOUT_SECS, parse_env_number(ENV_TIMEOUT_SECS, &v)?)?;
        }
        Ok(())
    }

    fn apply_cli(&mut self, cli: &CliOverrides) {
        if let Some(v) = &cli.api_key {
            self.api_key = Some(v.clone());
        }
        if let Some(v) = &cli.channel_id {
            self.channel_id = v.clone();
        }
        if let Some(v) = cli.days {
            self.days = v;
        }
        if cli.published_after.is_some() {
            self.published_after = cli.published_after;
        }
        if cli.published_before.is_some() {
            self.published_before = cli.published_before;
        }
        if let Some(v) = &cli.max_duration {
            self.max_duration = v.clone();
        }
        if let Some(v) = cli.page_size {
            self.page_size = v;
        }
        if let Some(v) = &cli.output {
            self.output = v.clone();
        }
    }

    /// API key, or an error when no layer provided one
    pub fn require_api_key(&self) -> UrlPullResult<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(UrlPullError::MissingApiKey)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Publication window relative to `now`
    ///
    /// Explicit bounds win; a missing bound falls back to `now` for the end
    /// and `end - days` for the start.
    pub fn window(&self, now: DateTime<Utc>) -> Result<TimeWindow, DomainError> {
        let end = self.published_before.unwrap_or(now);
        match self.published_after {
            Some(start) => TimeWindow::new(start, end),
            None => TimeWindow::last_days(self.days, end),
        }
    }

    /// Build the fetch query for a run starting at `now`
    pub fn fetch_query(&self, now: DateTime<Utc>) -> Result<FetchQuery, DomainError> {
        QueryRules::build(
            &self.channel_id,
            self.window(now)?,
            &self.max_duration,
            self.page_size,
        )
    }
}

fn parse_env_number<T: std::str::FromStr>(key: &str, value: &str) -> UrlPullResult<T> {
    value.trim().parse().map_err(|_| UrlPullError::Config {
        message: format!("{} must be a number, got '{}'", key, value),
    })
}

fn nonzero_timeout(key: &str, secs: u64) -> UrlPullResult<u64> {
    if secs == 0 {
        return Err(UrlPullError::Config {
            message: format!("{} must be at least one second", key),
        });
    }
    Ok(secs)
}

/// Initialize configuration hierarchy following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(
    config_path: Option<&Path>,
    cli: &CliOverrides,
) -> UrlPullResult<Settings> {
    info!("Initializing configuration hierarchy");

    // Values from .env never replace variables already present in the process
    match dotenv::dotenv() {
        Ok(path) => debug!("Loaded environment file: {}", path.display()),
        Err(e) => debug!("No .env file loaded: {}", e),
    }

    let file = TomlConfigAdapter::load(config_path)?;
    let settings = Settings::resolve(file, |key| std::env::var(key).ok(), cli)?;

    info!("Configuration hierarchy initialized successfully");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings =
            Settings::resolve(FileSettings::default(), env_from(&[]), &CliOverrides::default())
                .unwrap();
        assert_eq!(settings, Settings::default());
        assert!(matches!(
            settings.require_api_key(),
            Err(UrlPullError::MissingApiKey)
        ));
    }

    #[test]
    fn test_precedence_cli_over_env_over_file() {
        let file = FileSettings {
            channel_id: Some("from-file".to_string()),
            page_size: Some(10),
            days: Some(7),
            ..Default::default()
        };
        let env = env_from(&[(ENV_CHANNEL_ID, "from-env"), (ENV_PAGE_SIZE, "20")]);
        let cli = CliOverrides {
            channel_id: Some("from-cli".to_string()),
            ..Default::default()
        };

        let settings = Settings::resolve(file, env, &cli).unwrap();

        assert_eq!(settings.channel_id, "from-cli");
        assert_eq!(settings.page_size, 20);
        assert_eq!(settings.days, 7);
    }

    #[test]
    fn test_env_api_key_and_blank_values() {
        let env = env_from(&[(ENV_API_KEY, " secret "), (ENV_CHANNEL_ID, "  ")]);
        let settings =
            Settings::resolve(FileSettings::default(), env, &CliOverrides::default()).unwrap();
        assert_eq!(settings.require_api_key().unwrap(), "secret");
        assert_eq!(settings.channel_id, DEFAULT_CHANNEL_ID);
    }

    #[test]
    fn test_env_number_parse_error() {
        let env = env_from(&[(ENV_PAGE_SIZE, "fifty")]);
        let result = Settings::resolve(FileSettings::default(), env, &CliOverrides::default());
        assert!(matches!(result, Err(UrlPullError::Config { .. })));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let env = env_from(&[(ENV_TIMEOUT_SECS, "0")]);
        let result = Settings::resolve(FileSettings::default(), env, &CliOverrides::default());
        assert!(matches!(result, Err(UrlPullError::Config { .. })));

        let file = FileSettings {
            timeout_secs: Some(0),
            ..Default::default()
        };
        let result = Settings::resolve(file, env_from(&[]), &CliOverrides::default());
        assert!(matches!(result, Err(UrlPullError::Config { .. })));

        let env = env_from(&[(ENV_TIMEOUT_SECS, "5")]);
        let settings =
            Settings::resolve(FileSettings::default(), env, &CliOverrides::default()).unwrap();
        assert_eq!(settings.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_window_from_days_and_explicit_bounds() {
        let now = Utc.with_ymd_and_hms(2025, 10, 26, 0, 0, 0).unwrap();
        let mut settings = Settings::default();

        let window = settings.window(now).unwrap();
        assert_eq!(window.start(), Utc.with_ymd_and_hms(2024, 10, 26, 0, 0, 0).unwrap());
        assert_eq!(window.end(), now);

        settings.published_after = Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        settings.published_before = Some(Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap());
        let window = settings.window(now).unwrap();
        assert_eq!(window.published_after(), "2025-01-01T00:00:00Z");
        assert_eq!(window.published_before(), "2025-02-01T00:00:00Z");

        settings.published_after = Some(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap());
        assert!(settings.window(now).is_err());
    }

    #[test]
    fn test_fetch_query_validation() {
        let now = Utc.with_ymd_and_hms(2025, 10, 26, 0, 0, 0).unwrap();
        let mut settings = Settings::default();
        assert!(settings.fetch_query(now).is_ok());

        settings.page_size = 0;
        assert!(settings.fetch_query(now).is_err());
    }
}
