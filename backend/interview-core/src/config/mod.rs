pub mod env;

pub use env::{EnvLoadResult, try_load_dotenv};

use crate::error::config::ConfigError;
use crate::{DEFAULT_ANALYSIS_API_URL, DEFAULT_BIND_ADDR, DEFAULT_EXECUTION_API_URL};

use common::ErrorLocation;
use models::InterviewSettingsBuilder;
use models::call::session::{DEFAULT_CODING_ROUND_MINUTES, DEFAULT_INTERVIEW_MINUTES};

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_DIR_NAME: &str = "interview";
const CONFIG_VERSION: u32 = 1;
const DEFAULT_EXECUTION_TIMEOUT: &str = "20s";

// ============================================
// CONFIG STRUCTS
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExecutionConfig {
    #[serde(default = "default_execution_api_url")]
    pub api_url: String,
    /// humantime duration, e.g. `20s` or `1m 30s`.
    #[serde(default = "default_execution_timeout")]
    pub timeout: String,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            api_url: default_execution_api_url(),
            timeout: default_execution_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisConfig {
    #[serde(default = "default_analysis_api_url")]
    pub api_url: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            api_url: default_analysis_api_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InterviewConfig {
    #[serde(default = "default_interview_minutes")]
    pub duration_minutes: u32,
    #[serde(default = "default_coding_round_minutes")]
    pub coding_round_minutes: u32,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            duration_minutes: default_interview_minutes(),
            coding_round_minutes: default_coding_round_minutes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub execution: ExecutionConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub interview: InterviewConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            server: ServerConfig::default(),
            execution: ExecutionConfig::default(),
            analysis: AnalysisConfig::default(),
            interview: InterviewConfig::default(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_version() -> u32 {
    CONFIG_VERSION
}
fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}
fn default_execution_api_url() -> String {
    DEFAULT_EXECUTION_API_URL.to_string()
}
fn default_execution_timeout() -> String {
    DEFAULT_EXECUTION_TIMEOUT.to_string()
}
fn default_analysis_api_url() -> String {
    DEFAULT_ANALYSIS_API_URL.to_string()
}
fn default_interview_minutes() -> u32 {
    DEFAULT_INTERVIEW_MINUTES
}
fn default_coding_round_minutes() -> u32 {
    DEFAULT_CODING_ROUND_MINUTES
}

/// `<platform config dir>/interview`, or `./interview` when the platform has none.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

// ============================================
// IMPLEMENTATION
// ============================================

impl AppConfig {
    /// Load config from {config_dir}/config.json.
    ///
    /// # Returns
    ///
    /// Returns `Ok(AppConfig)` if loaded successfully or defaults if file missing.
    /// Returns `Err(ConfigError)` if file exists but is corrupted/invalid.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {}", e);
            ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config: AppConfig = serde_json::from_str(&contents).map_err(|e| {
            warn!("Failed to parse config JSON: {}", e);
            ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                reason: e.to_string(),
            }
        })?;

        config.validate()?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Loads the file, then `.env`, then applies environment overrides.
    pub fn resolve(config_dir: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(config_dir)?;

        let dotenv = try_load_dotenv();
        if !dotenv.loaded {
            info!("No .env file found, using process environment");
        }

        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to {config_dir}/config.json using atomic write.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - Validation fails
    /// - Directory creation fails
    /// - Serialization fails
    /// - Write or rename fails
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: config_dir.to_path_buf(),
            source: e,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let temp_path = config_dir.join(format!("{}.tmp", CONFIG_FILE_NAME));

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            location: ErrorLocation::from(Location::caller()),
            reason: e.to_string(),
        })?;

        std::fs::write(&temp_path, json).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &config_path).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: config_path.clone(),
            source: e,
        })?;

        info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Execution timeout parsed from its humantime form.
    pub fn execution_timeout(&self) -> Result<Duration, ConfigError> {
        humantime::parse_duration(&self.execution.timeout).map_err(|e| {
            ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Invalid execution timeout '{}': {}", self.execution.timeout, e),
            }
        })
    }

    /// Settings builder preloaded with the configured interview and coding
    /// round durations. Anything set on the builder afterwards wins.
    pub fn interview_settings(&self) -> InterviewSettingsBuilder {
        InterviewSettingsBuilder::default()
            .with_duration_minutes(self.interview.duration_minutes)
            .with_coding_round_minutes(self.interview.coding_round_minutes)
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid version: {} (expected 1-{})",
                    self.version, CONFIG_VERSION
                ),
            });
        }

        validate_url("execution.api_url", &self.execution.api_url)?;
        validate_url("analysis.api_url", &self.analysis.api_url)?;

        if self.execution_timeout()?.is_zero() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "Execution timeout must be greater than zero".to_string(),
            });
        }

        if self.server.bind_addr.is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "server.bind_addr cannot be empty".to_string(),
            });
        }

        if self.interview.duration_minutes == 0 || self.interview.coding_round_minutes == 0 {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Interview durations must be non-zero (interview {}m, coding round {}m)",
                    self.interview.duration_minutes, self.interview.coding_round_minutes
                ),
            });
        }

        Ok(())
    }
}

#[track_caller]
fn validate_url(field: &str, url: &str) -> Result<(), ConfigError> {
    if url.is_empty() {
        return Err(ConfigError::ValidationError {
            location: ErrorLocation::from(Location::caller()),
            reason: format!("{field} cannot be empty string"),
        });
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::ValidationError {
            location: ErrorLocation::from(Location::caller()),
            reason: format!("Invalid URL format for {field}: {url}"),
        });
    }

    Ok(())
}
