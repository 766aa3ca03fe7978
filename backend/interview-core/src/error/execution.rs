use common::ErrorLocation;

use std::panic::Location;

use models::ModelError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ExecutionError {
    #[error("HTTP Error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Execution API error {status}: {message} {location}")]
    Upstream {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    #[error("Unsupported language: {language} {location}")]
    UnsupportedLanguage {
        language: String,
        location: ErrorLocation,
    },

    #[error("Invalid Request: {message} {location}")]
    InvalidRequest {
        message: String,
        location: ErrorLocation,
    },
}

impl From<url::ParseError> for ExecutionError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ExecutionError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for ExecutionError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        ExecutionError::Http {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ModelError> for ExecutionError {
    #[track_caller]
    fn from(error: ModelError) -> Self {
        match error {
            ModelError::UnsupportedLanguage { language, location } => {
                ExecutionError::UnsupportedLanguage { language, location }
            }
            ModelError::Validation { message, location } => {
                ExecutionError::InvalidRequest { message, location }
            }
        }
    }
}

impl ExecutionError {
    /// Text shown in place of program output when a run fails.
    pub fn display_message(&self) -> String {
        match self {
            ExecutionError::Http { message, .. }
            | ExecutionError::UrlParse { message, .. }
            | ExecutionError::InvalidRequest { message, .. } => message.clone(),
            ExecutionError::Upstream {
                status, message, ..
            } => format!("Execution API error {status}: {message}"),
            ExecutionError::UnsupportedLanguage { language, .. } => {
                format!("Unsupported language: {language}")
            }
        }
    }
}
