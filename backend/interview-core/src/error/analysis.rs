use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum AnalysisError {
    #[error("HTTP Error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    /// The analysis backend answered with a non-success status.
    #[error("Upstream Error: {status} {detail} {location}")]
    Upstream {
        status: HttpStatusCode,
        detail: String,
        location: ErrorLocation,
    },

    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },
}

impl AnalysisError {
    /// Status the route relays for this error.
    pub fn status(&self) -> HttpStatusCode {
        match self {
            AnalysisError::Upstream { status, .. } => *status,
            AnalysisError::Validation { .. } => HttpStatusCode::BAD_REQUEST,
            _ => HttpStatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message relayed to the caller under `error`.
    pub fn client_message(&self) -> &str {
        match self {
            AnalysisError::Http { message, .. }
            | AnalysisError::Json { message, .. }
            | AnalysisError::UrlParse { message, .. }
            | AnalysisError::Validation { message, .. } => message,
            AnalysisError::Upstream { detail, .. } => detail,
        }
    }
}

impl From<url::ParseError> for AnalysisError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        AnalysisError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for AnalysisError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        AnalysisError::Http {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for AnalysisError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        AnalysisError::Json {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
