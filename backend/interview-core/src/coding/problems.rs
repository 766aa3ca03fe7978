//! Coding problem catalog.
//!
//! Ships embedded in the binary; a `problems.toml` in the config directory
//! replaces it.

use crate::error::config::ConfigError;

use common::ErrorLocation;

use std::panic::Location;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

const PROBLEMS_FILE_NAME: &str = "problems.toml";
const EMBEDDED_PROBLEMS: &str = include_str!("problems.toml");

// ============================================
// CATALOG STRUCTS
// ============================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sample {
    pub stdin: String,
    #[serde(default)]
    pub expected: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Problem {
    pub key: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub description: String,
    #[serde(default)]
    pub samples: Vec<Sample>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemCatalog {
    #[serde(default)]
    problems: Vec<Problem>,
}

// ============================================
// IMPLEMENTATION
// ============================================

impl ProblemCatalog {
    /// The catalog compiled into the binary.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::parse(EMBEDDED_PROBLEMS, Path::new(PROBLEMS_FILE_NAME))
    }

    /// `{config_dir}/problems.toml` if present and valid, else the embedded catalog.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(PROBLEMS_FILE_NAME);

        if path.exists() {
            match Self::load_from_path(&path) {
                Ok(catalog) => {
                    info!(
                        "Loaded {} problems from {}",
                        catalog.problems.len(),
                        path.display()
                    );
                    return Ok(catalog);
                }
                Err(e) => warn!("Failed to load problems from {}: {}", path.display(), e),
            }
        }

        Self::embedded()
    }

    fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            location: ErrorLocation::from(Location::caller()),
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&contents, path)
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let catalog: ProblemCatalog =
            toml::from_str(contents).map_err(|e| ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: PathBuf::from(path),
                reason: e.to_string(),
            })?;

        catalog.validate()?;
        Ok(catalog)
    }

    /// Keys must be non-empty and unique; every problem needs a sample.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.problems.is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "Problem catalog is empty".to_string(),
            });
        }

        for (index, problem) in self.problems.iter().enumerate() {
            if problem.key.is_empty() {
                return Err(ConfigError::ValidationError {
                    location: ErrorLocation::from(Location::caller()),
                    reason: format!("Problem #{index} has an empty key"),
                });
            }

            if self.problems[..index].iter().any(|p| p.key == problem.key) {
                return Err(ConfigError::ValidationError {
                    location: ErrorLocation::from(Location::caller()),
                    reason: format!("Duplicate problem key '{}'", problem.key),
                });
            }

            if problem.samples.is_empty() {
                return Err(ConfigError::ValidationError {
                    location: ErrorLocation::from(Location::caller()),
                    reason: format!("Problem '{}' has no samples", problem.key),
                });
            }
        }

        Ok(())
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn get(&self, key: &str) -> Option<&Problem> {
        self.problems.iter().find(|p| p.key == key)
    }

    /// The problem selected when the editor opens.
    pub fn first(&self) -> Option<&Problem> {
        self.problems.first()
    }

    /// Stdin of the problem's first sample.
    pub fn default_stdin(&self, key: &str) -> Option<&str> {
        self.get(key)?.samples.first().map(|s| s.stdin.as_str())
    }
}
