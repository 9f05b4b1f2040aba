//! Configuration module for Mini-Radar
//!
//! Provides configuration loading, validation, and default settings
//! for the radar.

mod defaults;
mod loader;
mod validator;

pub use defaults::{default_config, ConfigDefaults};
pub use loader::{
    ConfigLoader, DisplayConfig, LoggingConfig, PollingConfig, TargetConfig,
    DEFAULT_CONFIG_FILE,
};
pub use validator::{validate_config, ConfigValidator};

// Re-export the main configuration structure
pub use loader::Config;

// Configuration-related error type
pub use loader::ConfigError;

impl From<ConfigError> for crate::core::types::RadarError {
    fn from(err: ConfigError) -> Self {
        crate::core::types::RadarError::Config(err.to_string())
    }
}
