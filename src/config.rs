//! Configuration loading.
//!
//! Configuration is stored in TOML with the following structure:
//!
//! ```toml
//! [logging]
//! level = "info"      # trace, debug, info, warn, error or off
//! console = true      # print each file event to the console
//!
//! [[jobs]]
//! strategy = "add_underscore_prefix"
//! path = "./inbox"
//!
//! [[jobs]]
//! strategy = "create_files_by_counter"
//! path = "./out"
//! file_name = "f"
//! start = 1
//! end = 3
//! ```
//!
//! `jobs` are run in order by `fileorg run`.

use crate::strategy::FileOperationStrategy;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::level_filters::LevelFilter;

/// Name of the per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = ".fileorgrc.toml";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    #[error("Invalid configuration in {}: {source}", path.display())]
    ConfigInvalid {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// IO error while reading configuration.
    #[error("IO error reading configuration {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Strategies run in order by the `run` command.
    #[serde(default)]
    pub jobs: Vec<FileOperationStrategy>,
}

/// Logging and console output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level written by the tracing subscriber.
    #[serde(default)]
    pub level: LogLevel,

    /// Whether file events are echoed to the console. Defaults to true.
    #[serde(default = "default_console")]
    pub console: bool,
}

fn default_console() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            console: default_console(),
        }
    }
}

/// Log verbosity as written in the configuration file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

impl Config {
    /// Load configuration from a file, with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.fileorgrc.toml` in the current directory
    /// 3. Look for `~/.config/fileorg/config.toml` in home directory
    /// 4. Fall back to default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is explicitly provided but
    /// cannot be read, or if any file found is not valid.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("fileorg")
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

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::ConfigInvalid {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), jobs = config.jobs.len(), "configuration loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert!(config.logging.console);
        assert!(config.jobs.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            [logging]
            level = "debug"
            console = false

            [[jobs]]
            strategy = "add_underscore_prefix"
            path = "inbox"

            [[jobs]]
            strategy = "create_files_by_counter"
            path = "out"
            file_name = "f"
            start = 1
            end = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.level, LogLevel::Debug);
        assert!(!config.logging.console);
        assert_eq!(config.jobs.len(), 2);
        assert_eq!(config.jobs[1].name(), "create_files_by_counter");
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str("[logging]\nlevel = \"trace\"\n").unwrap();
        assert_eq!(config.logging.level, LogLevel::Trace);
        assert!(config.logging.console);
        assert!(config.jobs.is_empty());
    }

    #[test]
    fn test_unknown_strategy_is_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[[jobs]]\nstrategy = \"shred\"\npath = \"x\"\n").unwrap();

        let result = Config::load(Some(&path));
        assert!(matches!(result, Err(ConfigError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::load(Some(&temp_dir.path().join("nope.toml")));
        assert!(matches!(result, Err(ConfigError::ConfigNotFound(_))));
    }

    #[test]
    fn test_log_level_to_filter() {
        assert_eq!(LevelFilter::from(LogLevel::Info), LevelFilter::INFO);
        assert_eq!(LevelFilter::from(LogLevel::Off), LevelFilter::OFF);
    }
}
