// Config loading and validation tests

use ipcapture::config::{AppConfig, OutputFormat};
use std::io::Write;

const VALID_CONFIG: &str = r#"
[output]
format = "text"
pretty = false

[watch]
enabled = true
refresh_interval_ms = 2500
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.output.format, OutputFormat::Text);
    assert!(!config.output.pretty);
    assert!(config.watch.enabled);
    assert_eq!(config.watch.refresh_interval_ms, 2500);
}

#[test]
fn test_config_empty_uses_defaults() {
    let config = AppConfig::load_from_str("").expect("empty config");
    assert_eq!(config.output.format, OutputFormat::Json);
    assert!(config.output.pretty);
    assert!(!config.watch.enabled);
    assert_eq!(config.watch.refresh_interval_ms, 5000);
}

#[test]
fn test_config_partial_section_fills_defaults() {
    let config = AppConfig::load_from_str("[watch]\nenabled = true\n").unwrap();
    assert!(config.watch.enabled);
    assert_eq!(config.watch.refresh_interval_ms, 5000);
}

#[test]
fn test_config_validation_rejects_zero_interval() {
    let bad = VALID_CONFIG.replace("refresh_interval_ms = 2500", "refresh_interval_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("watch.refresh_interval_ms"));
}

#[test]
fn test_config_rejects_unknown_format() {
    let bad = VALID_CONFIG.replace("format = \"text\"", "format = \"yaml\"");
    assert!(AppConfig::load_from_str(&bad).is_err());
}

#[test]
fn test_config_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(VALID_CONFIG.as_bytes()).unwrap();
    let path = file.path().to_str().unwrap();
    let config = AppConfig::load_from_path(path).expect("load_from_path");
    assert_eq!(config.watch.refresh_interval_ms, 2500);
}

#[test]
fn test_config_missing_explicit_file_errors() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let err = AppConfig::load_from_path(path.to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("absent.toml"));
}
