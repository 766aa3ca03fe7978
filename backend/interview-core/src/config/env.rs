//! `.env` loading and environment overrides.

use crate::config::AppConfig;
use crate::error::config::ConfigError;

use common::ErrorLocation;

use std::panic::Location;
use std::path::PathBuf;

use log::{debug, info, warn};

pub const ANALYSIS_API_URL_ENV: &str = "ANALYSIS_API_URL";
/// Legacy name for [`ANALYSIS_API_URL_ENV`], still set by older deployments.
pub const LEGACY_ANALYSIS_API_URL_ENV: &str = "COGNITOFORGE_API_URL";
pub const EXECUTION_API_URL_ENV: &str = "EXECUTION_API_URL";
pub const EXECUTION_TIMEOUT_ENV: &str = "EXECUTION_TIMEOUT";
pub const BIND_ADDR_ENV: &str = "INTERVIEW_BIND_ADDR";

/// Outcome of looking for a `.env` file.
#[derive(Debug, Clone)]
pub struct EnvLoadResult {
    pub path: Option<PathBuf>,
    pub loaded: bool,
}

/// Attempts to load .env from known locations.
pub fn try_load_dotenv() -> EnvLoadResult {
    // Current directory first
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded .env from: {:?}", path);
        return EnvLoadResult {
            path: Some(path),
            loaded: true,
        };
    }

    // Then next to the executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let env_path = exe_dir.join(".env");
            if env_path.exists() {
                match dotenvy::from_path(&env_path) {
                    Ok(_) => {
                        info!("Loaded .env from: {:?}", env_path);
                        return EnvLoadResult {
                            path: Some(env_path),
                            loaded: true,
                        };
                    }
                    Err(e) => {
                        warn!("Failed to parse .env at {:?}: {}", env_path, e);
                    }
                }
            }
        }
    }

    EnvLoadResult {
        path: None,
        loaded: false,
    }
}

impl AppConfig {
    /// Applies overrides looked up through `lookup`. Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(url) = get(ANALYSIS_API_URL_ENV) {
            debug!("{ANALYSIS_API_URL_ENV} override: {url}");
            self.analysis.api_url = url;
        } else if let Some(url) = get(LEGACY_ANALYSIS_API_URL_ENV) {
            debug!("{LEGACY_ANALYSIS_API_URL_ENV} override: {url}");
            self.analysis.api_url = url;
        }

        if let Some(url) = get(EXECUTION_API_URL_ENV) {
            debug!("{EXECUTION_API_URL_ENV} override: {url}");
            self.execution.api_url = url;
        }

        if let Some(timeout) = get(EXECUTION_TIMEOUT_ENV) {
            humantime::parse_duration(&timeout).map_err(|e| ConfigError::EnvError {
                location: ErrorLocation::from(Location::caller()),
                var: EXECUTION_TIMEOUT_ENV.to_string(),
                reason: format!("'{timeout}' is not a duration: {e}"),
            })?;
            debug!("{EXECUTION_TIMEOUT_ENV} override: {timeout}");
            self.execution.timeout = timeout;
        }

        if let Some(addr) = get(BIND_ADDR_ENV) {
            debug!("{BIND_ADDR_ENV} override: {addr}");
            self.server.bind_addr = addr;
        }

        Ok(())
    }
}
