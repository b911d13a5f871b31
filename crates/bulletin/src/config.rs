//! Configuration management for bulletin.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use chrono::FixedOffset;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::board::BoardSettings;
use crate::error::{Error, Result};
use crate::persist::DEFAULT_KEY;
use crate::post::AUTHOR_MAX_CHARS;
use crate::render::{DateFormatter, Locale};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "bulletin";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "board.db";

/// Largest accepted UTC offset, in minutes (just under one day).
const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `BULLETIN_`, sections split on `__`)
/// 2. TOML config file at `~/.config/bulletin/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Display configuration.
    pub display: DisplayConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/bulletin/board.db`
    pub database_path: Option<PathBuf>,
    /// Store key holding the post collection.
    pub key: String,
}

/// Display-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Locale for labels and times.
    pub locale: Locale,
    /// Fixed UTC offset for display times, in minutes.
    /// Unset means the local time zone.
    pub utc_offset_minutes: Option<i32>,
    /// Author names longer than this are truncated.
    pub author_max_chars: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            key: DEFAULT_KEY.to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            utc_offset_minutes: None,
            author_max_chars: AUTHOR_MAX_CHARS,
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("BULLETIN_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.storage.key.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "storage key must not be empty".to_string(),
            });
        }

        if self.display.author_max_chars == 0 {
            return Err(Error::ConfigValidation {
                message: "author_max_chars must be greater than 0".to_string(),
            });
        }

        if let Some(minutes) = self.display.utc_offset_minutes {
            if minutes.abs() > MAX_OFFSET_MINUTES {
                return Err(Error::ConfigValidation {
                    message: format!(
                        "utc_offset_minutes ({minutes}) must be within ±{MAX_OFFSET_MINUTES}"
                    ),
                });
            }
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the configured display offset, if any.
    #[must_use]
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        self.display
            .utc_offset_minutes
            .and_then(|minutes| FixedOffset::east_opt(minutes * 60))
    }

    /// Board settings derived from the display configuration.
    #[must_use]
    pub fn board_settings(&self) -> BoardSettings {
        let locale = self.display.locale;
        let dates = match self.utc_offset() {
            Some(offset) => DateFormatter::with_offset(locale, offset),
            None => DateFormatter::local(locale),
        };
        BoardSettings {
            locale,
            dates,
            author_max_chars: self.display.author_max_chars,
        }
    }
}
