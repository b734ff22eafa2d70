//! Configuration loading and parsing

use anyhow::{Context, Result};
use match_event_decoder::{ActionCategories, ExtractorConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main application configuration (loaded from config.toml)
///
/// Every section is optional; a missing file section falls back to defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub extractor: ExtractorConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub actions: ActionCategories,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Involvement window size in seconds
    #[serde(default = "default_window_seconds")]
    pub window_seconds: f64,
    /// Minimum match length covered by involvement windows, in seconds
    #[serde(default = "default_match_duration_floor")]
    pub match_duration_floor: f64,
    /// Number of actions listed in the match summary
    #[serde(default = "default_top_actions")]
    pub top_actions: usize,
}

fn default_window_seconds() -> f64 {
    300.0
}

fn default_match_duration_floor() -> f64 {
    5400.0
}

fn default_top_actions() -> usize {
    10
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            window_seconds: default_window_seconds(),
            match_duration_floor: default_match_duration_floor(),
            top_actions: default_top_actions(),
        }
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    if !(config.report.window_seconds > 0.0) {
        anyhow::bail!(
            "Invalid report.window_seconds in {:?}: must be positive",
            path
        );
    }

    Ok(config)
}
