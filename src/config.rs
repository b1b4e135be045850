//! User configuration.
//!
//! Settings are read from a TOML file. Every key is optional:
//!
//! ```toml
//! [log]
//! file_name = ".sortdir_log.json"
//!
//! [output]
//! color = true
//! progress = true
//! ```
//!
//! The category table itself is compiled in and cannot be configured.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default name of the move log inside the sorted directory.
pub const DEFAULT_LOG_FILE_NAME: &str = ".sortdir_log.json";

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),
    /// The log file name is empty or contains a path separator.
    #[error("Invalid log file name '{0}': expected a plain file name")]
    InvalidLogFileName(String),
    /// IO error while reading configuration.
    #[error("IO error reading configuration: {0}")]
    IoError(#[from] std::io::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub log: LogSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

/// Where the move log lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    /// File name of the log, placed inside the target directory.
    #[serde(default = "default_log_file_name")]
    pub file_name: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            file_name: default_log_file_name(),
        }
    }
}

fn default_log_file_name() -> String {
    DEFAULT_LOG_FILE_NAME.to_string()
}

/// Terminal output preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Whether to color output.
    #[serde(default = "default_true")]
    pub color: bool,
    /// Whether to show a progress bar while moving files.
    #[serde(default = "default_true")]
    pub progress: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            color: true,
            progress: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file, with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.sortdirrc.toml` in the current directory
    /// 3. Look for `~/.config/sortdir/config.toml` in home directory
    /// 4. Fall back to default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is explicitly provided but cannot
    /// be read, or if any file found is invalid.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(".sortdirrc.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("sortdir")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Parses and validates configuration text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let name = &self.log.file_name;
        let mut components = Path::new(name).components();
        let plain = matches!(
            (components.next(), components.next()),
            (Some(std::path::Component::Normal(_)), None)
        );
        if !plain {
            return Err(ConfigError::InvalidLogFileName(name.clone()));
        }
        Ok(())
    }

    /// Resolves the move log path.
    ///
    /// An explicit `log_file` wins. Otherwise the configured file name is placed
    /// inside `directory`, or inside the current directory when none is given.
    pub fn resolve_log_path(&self, directory: Option<&Path>, log_file: Option<&Path>) -> PathBuf {
        if let Some(log_file) = log_file {
            return log_file.to_path_buf();
        }
        directory
            .unwrap_or_else(|| Path::new("."))
            .join(&self.log.file_name)
    }
}
