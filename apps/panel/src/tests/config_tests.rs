use super::*;

use std::{
    collections::HashMap,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_config(contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("motor_panel_config_test_{suffix}.toml"));
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn defaults_match_stock_device_address() {
    let settings = Settings::default();
    assert_eq!(settings.host, "192.168.1.100");
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file_settings(&mut settings, "host = \"10.0.0.5\"\nlog_filter = \"debug\"\n")
        .expect("parse");
    assert_eq!(settings.host, "10.0.0.5");
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn partial_file_keeps_remaining_defaults() {
    let mut settings = Settings::default();
    apply_file_settings(&mut settings, "log_filter = \"warn\"\n").expect("parse");
    assert_eq!(settings.host, "192.168.1.100");
    assert_eq!(settings.log_filter, "warn");
}

#[test]
fn unknown_keys_are_rejected() {
    let mut settings = Settings::default();
    assert!(apply_file_settings(&mut settings, "hostname = \"10.0.0.5\"\n").is_err());
}

#[test]
fn env_overrides_win_over_file_values() {
    let vars = HashMap::from([
        ("MOTOR_PANEL_HOST", "10.0.0.7"),
        ("APP__HOST", "10.0.0.8"),
        ("MOTOR_PANEL_LOG", "trace"),
    ]);
    let mut settings = Settings::default();
    apply_file_settings(&mut settings, "host = \"10.0.0.5\"\n").expect("parse");
    apply_env_overrides(&mut settings, |key| vars.get(key).map(|v| v.to_string()));

    assert_eq!(settings.host, "10.0.0.8");
    assert_eq!(settings.log_filter, "trace");
}

#[test]
fn explicit_config_file_is_loaded() {
    let path = temp_config("host = \"172.16.0.9\"\n");
    let settings = load_settings(Some(&path)).expect("load");
    fs::remove_file(&path).expect("cleanup");

    if env::var("MOTOR_PANEL_HOST").is_err() && env::var("APP__HOST").is_err() {
        assert_eq!(settings.host, "172.16.0.9");
    }
}

#[test]
fn missing_explicit_config_file_is_an_error() {
    let path = env::temp_dir().join("motor_panel_config_test_does_not_exist.toml");
    let err = load_settings(Some(&path)).expect_err("must fail");
    assert!(err.to_string().contains("failed to read config"));
}
