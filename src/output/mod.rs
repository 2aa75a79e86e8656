//! Result set rendering for the console

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::model::ResultSet;
use crate::error::{UrlPullError, UrlPullResult};

/// Output format of the summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SummaryFormat {
    /// Numbered human-readable listing
    Text,
    /// Pretty-printed JSON array
    Json,
    /// YAML sequence
    Yaml,
}

impl SummaryFormat {
    /// Parse format name (case insensitive)
    pub fn parse(format: &str) -> Result<Self, DomainError> {
        match format.to_lowercase().as_str() {
            "text" => Ok(SummaryFormat::Text),
            "json" => Ok(SummaryFormat::Json),
            "yaml" | "yml" => Ok(SummaryFormat::Yaml),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid format: {}. Valid formats: text, json, yaml",
                format
            ))),
        }
    }
}

/// Render a result set in the requested format
pub fn render_summary(result: &ResultSet, format: SummaryFormat) -> UrlPullResult<String> {
    match format {
        SummaryFormat::Text => Ok(format_as_text(result)),
        SummaryFormat::Json => {
            serde_json::to_string_pretty(result.videos()).map_err(|e| UrlPullError::Render {
                message: format!("JSON serialization failed: {}", e),
            })
        }
        SummaryFormat::Yaml => {
            serde_yaml::to_string(result.videos()).map_err(|e| UrlPullError::Render {
                message: format!("YAML serialization failed: {}", e),
            })
        }
    }
}

fn format_as_text(result: &ResultSet) -> String {
    if result.is_empty() {
        return "No videos found.\n".to_string();
    }

    let rule = "=".repeat(80);
    let mut output = String::new();
    output.push_str(&format!("\n{}\nVIDEO SUMMARY\n{}\n", rule, rule));

    for (i, video) in result.iter().enumerate() {
        output.push_str(&format!("\n{:3}. {}\n", i + 1, video.title));
        output.push_str(&format!("     Video ID: {}\n", video.video_id));
        output.push_str(&format!(
            "     Published: {}\n",
            video.published_at.format("%Y-%m-%dT%H:%M:%SZ")
        ));
        output.push_str(&format!("     URL: {}\n", video.video_url));
    }

    output.push_str(&format!("\n{}\n", rule));
    output
}
