//! Configuration validator for Mini-Radar
//!
//! Validates configuration values to ensure they are within acceptable ranges.

use super::loader::{Config, ConfigError, DisplayConfig, LoggingConfig, PollingConfig, TargetConfig};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the entire configuration
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        Self::validate_target(&config.target)?;
        Self::validate_polling(&config.polling)?;
        Self::validate_display(&config.display)?;
        Self::validate_logging(&config.logging)?;
        Ok(())
    }

    fn validate_target(target: &TargetConfig) -> Result<(), ConfigError> {
        if target.process_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Target process name cannot be empty".to_string(),
            ));
        }

        if target.primary_module.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Primary module name cannot be empty".to_string(),
            ));
        }

        if matches!(&target.secondary_module, Some(name) if name.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "Secondary module name cannot be empty; omit it instead".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_polling(polling: &PollingConfig) -> Result<(), ConfigError> {
        if !(10..=1000).contains(&polling.refresh_interval_ms) {
            return Err(ConfigError::Invalid(format!(
                "Refresh interval must be between 10 and 1000 ms, got {}",
                polling.refresh_interval_ms
            )));
        }

        if polling.retry_interval_ms < 100 {
            return Err(ConfigError::Invalid(
                "Retry interval must be at least 100 ms".to_string(),
            ));
        }

        if polling.fault_backoff_ms < 10 {
            return Err(ConfigError::Invalid(
                "Fault backoff must be at least 10 ms".to_string(),
            ));
        }

        if polling.status_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "Status interval must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_display(display: &DisplayConfig) -> Result<(), ConfigError> {
        if !(2..=4096).contains(&display.size) {
            return Err(ConfigError::Invalid(format!(
                "Display size must be between 2 and 4096, got {}",
                display.size
            )));
        }

        if !(0.01f32..=0.5).contains(&display.scale) {
            return Err(ConfigError::Invalid(format!(
                "Display scale must be between 0.01 and 0.5, got {}",
                display.scale
            )));
        }

        if display.default_map.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Default map cannot be empty".to_string(),
            ));
        }

        // Unknown maps are allowed; they project with the fallback bounds
        let map = &display.default_map;
        if !crate::game::maps::is_known_map(map) {
            tracing::warn!("Default map '{}' is not in the map registry", map);
        }

        Ok(())
    }

    fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid log level: {}. Must be one of: {:?}",
                logging.level, valid_levels
            )));
        }

        Ok(())
    }
}

/// Validates a configuration
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    ConfigValidator::validate(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_process_name() {
        let mut config = Config::default();
        config.target.process_name = "  ".to_string();
        let result = validate_config(&config);
        assert!(result.unwrap_err().to_string().contains("process name"));
    }

    #[test]
    fn test_missing_secondary_module_is_fine() {
        let mut config = Config::default();
        config.target.secondary_module = None;
        assert!(validate_config(&config).is_ok());

        config.target.secondary_module = Some(String::new());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_refresh_interval_range() {
        let mut config = Config::default();
        config.polling.refresh_interval_ms = 9;
        assert!(validate_config(&config).is_err());

        config.polling.refresh_interval_ms = 1001;
        assert!(validate_config(&config).is_err());

        config.polling.refresh_interval_ms = 10;
        assert!(validate_config(&config).is_ok());

        config.polling.refresh_interval_ms = 1000;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_recovery_timings() {
        let mut config = Config::default();
        config.polling.retry_interval_ms = 99;
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.polling.fault_backoff_ms = 5;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_display_limits() {
        let mut config = Config::default();
        config.display.size = 1;
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.display.scale = 0.75;
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.display.default_map = "de_nuke".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();
        let result = validate_config(&config);
        assert!(result.unwrap_err().to_string().contains("log level"));
    }
}
