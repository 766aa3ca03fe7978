use crate::call::{CallEffect, CallMachine};
use crate::config::AppConfig;
use crate::error::config::ConfigError;
use crate::{DEFAULT_ANALYSIS_API_URL, DEFAULT_BIND_ADDR, DEFAULT_EXECUTION_API_URL};

use std::time::Duration;

use tempfile::TempDir;

#[test]
fn given_defaults_when_validated_then_ok_with_service_urls() {
    let config = AppConfig::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.execution.api_url, DEFAULT_EXECUTION_API_URL);
    assert_eq!(config.analysis.api_url, DEFAULT_ANALYSIS_API_URL);
    assert_eq!(config.server.bind_addr, DEFAULT_BIND_ADDR);
    assert_eq!(config.execution_timeout().unwrap(), Duration::from_secs(20));
    assert_eq!(config.interview.duration_minutes, 1);
    assert_eq!(config.interview.coding_round_minutes, 45);
}

#[test]
fn given_missing_file_when_loading_then_defaults() {
    let temp = TempDir::new().unwrap();

    let config = AppConfig::load(temp.path()).unwrap();

    assert_eq!(config, AppConfig::default());
}

/// **VALUE**: Verifies save then load yields the same config and leaves no temp file behind.
///
/// **WHY THIS MATTERS**: Save writes to a temp file and renames it. A leftover temp file
/// means the rename failed silently and the next start reads stale settings.
#[test]
fn given_saved_config_when_loaded_then_same_values_and_no_temp_file() {
    // GIVEN: A non-default config
    let temp = TempDir::new().unwrap();
    let mut config = AppConfig::default();
    config.execution.timeout = "1m 30s".to_string();
    config.analysis.api_url = "http://analysis.internal:9000".to_string();
    config.interview.coding_round_minutes = 30;

    // WHEN: Saving and loading
    config.save(temp.path()).unwrap();
    let loaded = AppConfig::load(temp.path()).unwrap();

    // THEN: Same config, no temp file
    assert_eq!(loaded, config);
    assert_eq!(loaded.execution_timeout().unwrap(), Duration::from_secs(90));
    assert!(!temp.path().join("config.json.tmp").exists());
}

/// **VALUE**: Verifies partial files fill the missing sections with defaults.
///
/// **BUG THIS CATCHES**: Would catch a missing `#[serde(default)]` turning an older
/// config file into a parse error after a new section is added.
#[test]
fn given_partial_file_when_loading_then_missing_sections_defaulted() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("config.json"),
        r#"{ "analysis": { "api_url": "http://10.0.0.5:8000" } }"#,
    )
    .unwrap();

    let config = AppConfig::load(temp.path()).unwrap();

    assert_eq!(config.analysis.api_url, "http://10.0.0.5:8000");
    assert_eq!(config.execution.api_url, DEFAULT_EXECUTION_API_URL);
    assert_eq!(config.version, 1);
}

#[test]
fn given_corrupt_file_when_loading_then_parse_error() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.json"), "{ not json").unwrap();

    let err = AppConfig::load(temp.path()).unwrap_err();

    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn given_invalid_values_when_validated_then_validation_errors() {
    let cases: Vec<(&str, fn(&mut AppConfig))> = vec![
        ("version", |c| c.version = 0),
        ("future version", |c| c.version = 2),
        ("empty url", |c| c.execution.api_url = String::new()),
        ("ftp url", |c| c.analysis.api_url = "ftp://host".to_string()),
        ("bad timeout", |c| c.execution.timeout = "soon".to_string()),
        ("zero timeout", |c| c.execution.timeout = "0s".to_string()),
        ("empty bind", |c| c.server.bind_addr = String::new()),
        ("zero duration", |c| c.interview.duration_minutes = 0),
        ("zero coding", |c| c.interview.coding_round_minutes = 0),
    ];

    for (name, mutate) in cases {
        let mut config = AppConfig::default();
        mutate(&mut config);
        assert!(
            matches!(config.validate(), Err(ConfigError::ValidationError { .. })),
            "{name} should fail validation"
        );
    }
}

/// **VALUE**: Verifies an invalid config is never written to disk.
#[test]
fn given_invalid_config_when_saving_then_nothing_written() {
    let temp = TempDir::new().unwrap();
    let mut config = AppConfig::default();
    config.analysis.api_url = String::new();

    assert!(config.save(temp.path()).is_err());
    assert!(!temp.path().join("config.json").exists());
}

/// **VALUE**: Verifies configured interview durations drive the call clock.
///
/// **WHY THIS MATTERS**: Operators shorten or lengthen the spoken interview from
/// config; an interview built from that config must stop the call at that time.
///
/// **BUG THIS CATCHES**: Would catch the config section being loaded and validated
/// but never reaching the settings the call machine runs on.
#[test]
fn given_configured_durations_when_building_settings_then_call_machine_uses_them() {
    // GIVEN: A config with a 2 minute interview and a 30 minute coding round
    let mut config = AppConfig::default();
    config.interview.duration_minutes = 2;
    config.interview.coding_round_minutes = 30;

    // WHEN: Building settings from it and starting a call
    let settings = config
        .interview_settings()
        .with_id("iv-1")
        .with_interviewer_id("agent-1")
        .build()
        .unwrap();
    let mut machine = CallMachine::new(&settings);
    machine.mark_started("call-1");

    // THEN: The clock runs the configured length
    assert_eq!(machine.snapshot().interview_duration_secs, 120);
    assert_eq!(machine.snapshot().coding_remaining_secs(), 30 * 60);
    for _ in 0..119 {
        assert!(machine.tick().is_empty());
    }
    assert!(machine.tick().contains(&CallEffect::StopVoiceCall));
}

#[test]
fn given_builder_override_when_building_settings_then_override_wins() {
    let mut config = AppConfig::default();
    config.interview.duration_minutes = 2;

    let settings = config
        .interview_settings()
        .with_id("iv-1")
        .with_interviewer_id("agent-1")
        .with_duration_minutes(10)
        .build()
        .unwrap();

    assert_eq!(settings.duration_minutes, 10);
    assert_eq!(settings.coding_round_minutes, 45);
}
