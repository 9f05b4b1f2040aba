//! Default configuration values for Mini-Radar

use serde::{Deserialize, Serialize};

/// Default configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigDefaults {
    pub target: TargetDefaults,
    pub polling: PollingDefaults,
    pub display: DisplayDefaults,
    pub logging: LoggingDefaults,
}

/// Default target process configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetDefaults {
    pub process_name: String,
    pub primary_module: String,
    pub secondary_module: Option<String>,
}

/// Default polling cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingDefaults {
    pub refresh_interval_ms: u64,
    pub retry_interval_ms: u64,
    pub fault_backoff_ms: u64,
    pub status_interval_ms: u64,
}

/// Default display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayDefaults {
    pub size: u32,
    pub scale: f32,
    pub default_map: String,
    pub show_teammates: bool,
    pub show_grid: bool,
    pub show_health_bars: bool,
}

/// Default logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingDefaults {
    pub level: String,
}

/// Returns the default configuration
pub fn default_config() -> ConfigDefaults {
    ConfigDefaults {
        target: TargetDefaults {
            process_name: "cs2.exe".to_string(),
            primary_module: "client.dll".to_string(),
            secondary_module: Some("server.dll".to_string()),
        },
        polling: PollingDefaults {
            refresh_interval_ms: 100,
            retry_interval_ms: 5000,
            fault_backoff_ms: 1000,
            status_interval_ms: 5000,
        },
        display: DisplayDefaults {
            size: 400,
            scale: 0.1,
            default_map: crate::game::maps::DEFAULT_MAP.to_string(),
            show_teammates: true,
            show_grid: true,
            show_health_bars: true,
        },
        logging: LoggingDefaults {
            level: "info".to_string(),
        },
    }
}
