//! Configuration loading from TOML or JSON files

mod migrate;
mod settings;
mod store;

pub use migrate::{migrate, CONFIG_VERSION};
pub use settings::{LeashConfig, NotificationConfig, Settings, DEFAULT_CHAT_COLOR, DEFAULT_MESSAGE_FORMAT};
pub use store::{ConfigStore, LoadStatus};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write TOML: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// On-disk format of a config file, picked from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// `.json` files are JSON, everything else is TOML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }

    /// Deserialize a document in this format
    pub fn parse<T: serde::de::DeserializeOwned>(self, content: &str) -> Result<T, ConfigError> {
        match self {
            ConfigFormat::Toml => parse_toml(content),
            ConfigFormat::Json => parse_json(content),
        }
    }

    /// Serialize a value in this format
    pub fn render<T: serde::Serialize>(self, value: &T) -> Result<String, ConfigError> {
        match self {
            ConfigFormat::Toml => Ok(toml::to_string_pretty(value)?),
            ConfigFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        }
    }
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load a JSON string and deserialize it
pub fn parse_json<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = serde_json::from_str(content)?;
    Ok(config)
}

/// Load settings from a file, migrate them in memory and validate
///
/// Nothing is written back; use [`ConfigStore`] for that.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut settings: Settings = ConfigFormat::from_path(path).parse(&content)?;
    migrate(&mut settings);
    settings.validate()?;
    Ok(settings)
}
