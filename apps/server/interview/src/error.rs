use common::ErrorLocation;
use interview_core::error::analysis::AnalysisError;
use interview_core::error::config::ConfigError;
use interview_core::error::execution::ExecutionError;
use interview_core::error::server::ServerError;

use std::panic::Location;

use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the `interview` binary.
///
/// Printed as text, or as JSON under `--json`; location tracking is kept
/// either way.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum InterviewError {
    /// Error from this app
    #[error("Interview Error: {message} {location}")]
    Interview {
        message: String,
        location: ErrorLocation,
    },

    /// Error from interview-core (execution, analysis, server)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },

    /// Config file or environment could not be used
    #[error("Config Error: {message} {location}")]
    Config {
        message: String,
        location: ErrorLocation,
    },

    /// Reading input or writing output failed
    #[error("IO Error: {message} {location}")]
    Io {
        message: String,
        location: ErrorLocation,
    },
}

impl From<ConfigError> for InterviewError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        InterviewError::Config {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ExecutionError> for InterviewError {
    #[track_caller]
    fn from(error: ExecutionError) -> Self {
        InterviewError::Core {
            message: error.display_message(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<AnalysisError> for InterviewError {
    #[track_caller]
    fn from(error: AnalysisError) -> Self {
        InterviewError::Core {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ServerError> for InterviewError {
    #[track_caller]
    fn from(error: ServerError) -> Self {
        InterviewError::Core {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for InterviewError {
    #[track_caller]
    fn from(error: std::io::Error) -> Self {
        InterviewError::Io {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for InterviewError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        InterviewError::Io {
            message: format!("Failed to encode JSON: {error}"),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
