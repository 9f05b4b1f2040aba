//! Configuration loading from disk

use mini_radar::config::{validate_config, ConfigError, ConfigLoader};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_full_file_round_trips_every_section() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("mini-radar.toml");
    fs::write(
        &path,
        r#"
            [target]
            process_name = "cs2.exe"
            primary_module = "client.dll"

            [polling]
            refresh_interval_ms = 33
            retry_interval_ms = 2000
            fault_backoff_ms = 250
            status_interval_ms = 10000

            [display]
            size = 512
            scale = 0.2
            default_map = "de_inferno"
            show_teammates = false
            show_grid = false
            show_health_bars = true

            [logging]
            level = "debug"
        "#,
    )
    .unwrap();

    let config = ConfigLoader::new(&path).load().unwrap();
    validate_config(&config).unwrap();

    assert_eq!(config.target.secondary_module.as_deref(), Some("server.dll"));
    assert_eq!(config.polling.refresh_interval_ms, 33);
    assert_eq!(config.polling.fault_backoff_ms, 250);
    assert_eq!(config.display.size, 512);
    assert_eq!(config.display.default_map, "de_inferno");
    assert!(!config.display.show_teammates);
    assert!(config.display.show_health_bars);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_missing_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = ConfigLoader::new(temp_dir.path().join("absent.toml"))
        .load_or_default()
        .unwrap();
    assert_eq!(config.target.process_name, "cs2.exe");
    assert_eq!(config.polling.retry_interval_ms, 5000);
}

#[test]
fn test_out_of_range_values_fail_validation() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("mini-radar.toml");
    fs::write(&path, "[polling]\nrefresh_interval_ms = 5\n").unwrap();

    let config = ConfigLoader::new(&path).load().unwrap();
    let err = validate_config(&config).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().contains("Refresh interval"));
}

#[test]
fn test_wrong_types_are_parse_errors() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("mini-radar.toml");
    fs::write(&path, "[display]\nsize = \"big\"\n").unwrap();

    assert!(matches!(
        ConfigLoader::new(&path).load_or_default(),
        Err(ConfigError::TomlParse(_))
    ));
}
