//! Configuration loader for Mini-Radar
//!
//! Handles loading configuration from TOML files and merging with defaults.

use super::defaults::default_config;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// File name looked up when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "mini-radar.toml";

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_target")]
    pub target: TargetConfig,

    #[serde(default = "default_polling")]
    pub polling: PollingConfig,

    #[serde(default = "default_display")]
    pub display: DisplayConfig,

    #[serde(default = "default_logging")]
    pub logging: LoggingConfig,
}

/// Which process and modules to attach to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default = "default_process_name")]
    pub process_name: String,
    #[serde(default = "default_primary_module")]
    pub primary_module: String,
    #[serde(default = "default_secondary_module")]
    pub secondary_module: Option<String>,
}

/// Poll cadence and recovery timings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
    #[serde(default = "default_retry_interval_ms")]
    pub retry_interval_ms: u64,
    #[serde(default = "default_fault_backoff_ms")]
    pub fault_backoff_ms: u64,
    #[serde(default = "default_status_interval_ms")]
    pub status_interval_ms: u64,
}

impl PollingConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }

    pub fn fault_backoff(&self) -> Duration {
        Duration::from_millis(self.fault_backoff_ms)
    }

    pub fn status_interval(&self) -> Duration {
        Duration::from_millis(self.status_interval_ms)
    }
}

/// Values the renderer needs; the core only uses `size` and `default_map`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_display_size")]
    pub size: u32,
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default = "default_map")]
    pub default_map: String,
    #[serde(default = "default_true")]
    pub show_teammates: bool,
    #[serde(default = "default_true")]
    pub show_grid: bool,
    #[serde(default = "default_true")]
    pub show_health_bars: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Configuration loader
pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        ConfigLoader {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Loads configuration from file
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.config_path.exists() {
            return Err(ConfigError::FileNotFound(
                self.config_path.display().to_string(),
            ));
        }

        let contents = fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Loads configuration, falling back to defaults only when the file is absent.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default(&self) -> Result<Config, ConfigError> {
        match self.load() {
            Err(ConfigError::FileNotFound(_)) => Ok(Config::default()),
            other => other,
        }
    }
}

// Default functions for serde
fn default_target() -> TargetConfig {
    let defaults = default_config();
    TargetConfig {
        process_name: defaults.target.process_name,
        primary_module: defaults.target.primary_module,
        secondary_module: defaults.target.secondary_module,
    }
}

fn default_polling() -> PollingConfig {
    let defaults = default_config();
    PollingConfig {
        refresh_interval_ms: defaults.polling.refresh_interval_ms,
        retry_interval_ms: defaults.polling.retry_interval_ms,
        fault_backoff_ms: defaults.polling.fault_backoff_ms,
        status_interval_ms: defaults.polling.status_interval_ms,
    }
}

fn default_display() -> DisplayConfig {
    let defaults = default_config();
    DisplayConfig {
        size: defaults.display.size,
        scale: defaults.display.scale,
        default_map: defaults.display.default_map,
        show_teammates: defaults.display.show_teammates,
        show_grid: defaults.display.show_grid,
        show_health_bars: defaults.display.show_health_bars,
    }
}

fn default_logging() -> LoggingConfig {
    LoggingConfig {
        level: default_config().logging.level,
    }
}

// Individual field defaults
fn default_process_name() -> String {
    default_config().target.process_name
}

fn default_primary_module() -> String {
    default_config().target.primary_module
}

fn default_secondary_module() -> Option<String> {
    default_config().target.secondary_module
}

fn default_refresh_interval_ms() -> u64 {
    default_config().polling.refresh_interval_ms
}

fn default_retry_interval_ms() -> u64 {
    default_config().polling.retry_interval_ms
}

fn default_fault_backoff_ms() -> u64 {
    default_config().polling.fault_backoff_ms
}

fn default_status_interval_ms() -> u64 {
    default_config().polling.status_interval_ms
}

fn default_display_size() -> u32 {
    default_config().display.size
}

fn default_scale() -> f32 {
    default_config().display.scale
}

fn default_map() -> String {
    default_config().display.default_map
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    default_config().logging.level
}

impl Default for Config {
    fn default() -> Self {
        Config {
            target: default_target(),
            polling: default_polling(),
            display: default_display(),
            logging: default_logging(),
        }
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        default_target()
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        default_polling()
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        default_display()
    }
}
