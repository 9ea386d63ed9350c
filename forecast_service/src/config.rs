/// Service configuration loaded from `forecast.toml`.
///
/// Every field has a default, so a missing file or a partial file is fine.
/// Two environment variables (usually set through `.env`) override the file:
///   FORECAST_CONFIG — path of the TOML file
///   JMA_AREA_CODE   — forecast area code

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::ingest::jma::{DEFAULT_AREA_CODE, JMA_BASE_URL};
use crate::logging::LogLevel;

pub const DEFAULT_CONFIG_PATH: &str = "./forecast.toml";

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    pub feed: FeedConfig,
    pub logging: LoggingConfig,
    pub render: RenderConfig,
    /// Extra weather code → glyph entries layered over the built-in table.
    pub glyphs: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    pub base_url: String,
    pub area_code: String,
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: JMA_BASE_URL.to_string(),
            area_code: DEFAULT_AREA_CODE.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of "debug", "info", "warn", "error".
    pub level: String,
    pub file: Option<String>,
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            timestamps: false,
        }
    }
}

impl LoggingConfig {
    pub fn min_level(&self) -> Result<LogLevel, ConfigError> {
        match self.level.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(ConfigError::Invalid(format!("unknown log level: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub color: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// The file exists but could not be read.
    Io(String),
    /// The file is not valid TOML or has wrongly typed fields.
    Parse(String),
    /// A value parsed but is not acceptable.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Config read error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Config parse error: {}", msg),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

pub fn parse_config(text: &str) -> Result<ServiceConfig, ConfigError> {
    let config: ServiceConfig =
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config.logging.min_level()?;
    Ok(config)
}

/// Loads the config at `path`, falling back to defaults if it does not exist.
pub fn load_config(path: &str) -> Result<ServiceConfig, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(ServiceConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(format!("{}: {}", path, e)))?;
    parse_config(&text)
}

/// Loads the config named by `FORECAST_CONFIG` (or the default path) and
/// applies the `JMA_AREA_CODE` override.
pub fn load_from_env() -> Result<ServiceConfig, ConfigError> {
    let path = std::env::var("FORECAST_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let mut config = load_config(&path)?;
    apply_area_override(&mut config, std::env::var("JMA_AREA_CODE").ok());
    Ok(config)
}

fn apply_area_override(config: &mut ServiceConfig, area_code: Option<String>) {
    if let Some(area) = area_code.filter(|a| !a.trim().is_empty()) {
        config.feed.area_code = area.trim().to_string();
    }
}
