// TOML config adapter - Configuration file loading

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::error::{UrlPullError, UrlPullResult};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "url_pull.toml";

/// Values a config file may set; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    pub api_key: Option<String>,
    pub channel_id: Option<String>,
    pub days: Option<u32>,
    pub max_duration: Option<String>,
    pub page_size: Option<u32>,
    pub output: Option<PathBuf>,
    pub api_base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    url_pull: FileSettings,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Load the explicit config file, or the default one if it exists
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file yields empty settings.
    pub fn load(explicit: Option<&Path>) -> UrlPullResult<FileSettings> {
        match explicit {
            Some(path) => Self::load_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load_file(path)
                } else {
                    Ok(FileSettings::default())
                }
            }
        }
    }

    /// Load settings from a specific file
    pub fn load_file(path: &Path) -> UrlPullResult<FileSettings> {
        if !path.exists() {
            return Err(UrlPullError::Config {
                message: format!("Config file does not exist: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let settings = Self::parse(&content).map_err(|source| UrlPullError::ConfigParse {
            path: path.display().to_string(),
            source,
        })?;

        info!("Loaded configuration from: {}", path.display());
        Ok(settings)
    }

    /// Parse the `[url_pull]` table of a TOML document
    pub fn parse(content: &str) -> Result<FileSettings, toml::de::Error> {
        let document: ConfigDocument = toml::from_str(content)?;
        Ok(document.url_pull)
    }
}
