use crate::config::AppConfig;
use crate::config::env::{
    ANALYSIS_API_URL_ENV, BIND_ADDR_ENV, EXECUTION_API_URL_ENV, EXECUTION_TIMEOUT_ENV,
    LEGACY_ANALYSIS_API_URL_ENV,
};
use crate::error::config::ConfigError;

use std::collections::HashMap;
use std::time::Duration;

use serial_test::serial;
use tempfile::TempDir;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

/// **VALUE**: Verifies every supported variable overrides its config field.
///
/// **WHY THIS MATTERS**: Deployments point the server at their analysis backend through
/// `ANALYSIS_API_URL`; an ignored override silently talks to localhost.
#[test]
fn given_env_vars_when_applying_overrides_then_fields_replaced() {
    // GIVEN: All overrides set
    let mut config = AppConfig::default();
    let vars = lookup(&[
        (ANALYSIS_API_URL_ENV, "http://analysis:8000"),
        (EXECUTION_API_URL_ENV, "http://piston:2000/api/v2"),
        (EXECUTION_TIMEOUT_ENV, "5s"),
        (BIND_ADDR_ENV, "0.0.0.0:8080"),
    ]);

    // WHEN: Applying them
    config.apply_env_overrides(vars).unwrap();

    // THEN: Each field follows its variable
    assert_eq!(config.analysis.api_url, "http://analysis:8000");
    assert_eq!(config.execution.api_url, "http://piston:2000/api/v2");
    assert_eq!(config.execution_timeout().unwrap(), Duration::from_secs(5));
    assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
}

#[test]
fn given_empty_env_values_when_applying_overrides_then_ignored() {
    let mut config = AppConfig::default();

    config
        .apply_env_overrides(lookup(&[(ANALYSIS_API_URL_ENV, "  ")]))
        .unwrap();

    assert_eq!(config, AppConfig::default());
}

/// **VALUE**: Verifies the legacy analysis URL variable is honoured, and the current
/// name wins when both are set.
///
/// **WHY THIS MATTERS**: Existing deployments export `COGNITOFORGE_API_URL`; dropping
/// it would silently point them at localhost.
#[test]
fn given_legacy_analysis_url_env_when_applying_overrides_then_used_unless_current_set() {
    // GIVEN / WHEN: Only the legacy name set
    let mut legacy_only = AppConfig::default();
    legacy_only
        .apply_env_overrides(lookup(&[(LEGACY_ANALYSIS_API_URL_ENV, "http://forge:8000")]))
        .unwrap();

    // GIVEN / WHEN: Both names set
    let mut both = AppConfig::default();
    both.apply_env_overrides(lookup(&[
        (LEGACY_ANALYSIS_API_URL_ENV, "http://forge:8000"),
        (ANALYSIS_API_URL_ENV, "http://analysis:8000"),
    ]))
    .unwrap();

    // THEN: Legacy applies alone, current name takes precedence
    assert_eq!(legacy_only.analysis.api_url, "http://forge:8000");
    assert_eq!(both.analysis.api_url, "http://analysis:8000");
}

/// **VALUE**: Verifies an unparseable timeout names the variable instead of being dropped.
#[test]
fn given_bad_timeout_env_when_applying_overrides_then_env_error() {
    let mut config = AppConfig::default();

    let err = config
        .apply_env_overrides(lookup(&[(EXECUTION_TIMEOUT_ENV, "forever")]))
        .unwrap_err();

    match err {
        ConfigError::EnvError { var, .. } => assert_eq!(var, EXECUTION_TIMEOUT_ENV),
        other => panic!("Expected EnvError, got {other:?}"),
    }
    assert_eq!(config.execution.timeout, "20s", "Config left untouched");
}

/// **VALUE**: Verifies resolve layers process environment over the config file.
///
/// **BUG THIS CATCHES**: Would catch resolve reading the file but forgetting overrides,
/// or overrides being applied before the file and then clobbered by it.
#[test]
#[serial]
fn given_file_and_process_env_when_resolving_then_env_wins() {
    // GIVEN: A file setting the analysis URL and an env var overriding it
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("config.json"),
        r#"{ "analysis": { "api_url": "http://from-file:8000" }, "server": { "bind_addr": "127.0.0.1:4000" } }"#,
    )
    .unwrap();
    unsafe {
        std::env::set_var(ANALYSIS_API_URL_ENV, "http://from-env:8000");
    }

    // WHEN: Resolving
    let result = AppConfig::resolve(temp.path());
    unsafe {
        std::env::remove_var(ANALYSIS_API_URL_ENV);
    }
    let config = result.unwrap();

    // THEN: Env wins, file values elsewhere kept
    assert_eq!(config.analysis.api_url, "http://from-env:8000");
    assert_eq!(config.server.bind_addr, "127.0.0.1:4000");
}

#[test]
#[serial]
fn given_invalid_env_url_when_resolving_then_validation_error() {
    let temp = TempDir::new().unwrap();
    unsafe {
        std::env::set_var(EXECUTION_API_URL_ENV, "piston.local");
    }

    let result = AppConfig::resolve(temp.path());
    unsafe {
        std::env::remove_var(EXECUTION_API_URL_ENV);
    }

    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}
