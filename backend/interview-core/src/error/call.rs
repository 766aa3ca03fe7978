use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum CallError {
    #[error("Voice Error: {message} {location}")]
    Voice {
        message: String,
        location: ErrorLocation,
    },

    #[error("Store Error: {message} {location}")]
    Store {
        message: String,
        location: ErrorLocation,
    },

    #[error("Camera Error: {message} {location}")]
    Camera {
        message: String,
        location: ErrorLocation,
    },

    #[error("Candidate Error: {message} {location}")]
    Candidate {
        message: String,
        location: ErrorLocation,
    },

    #[error("Controller Error: {message} {location}")]
    Controller {
        message: String,
        location: ErrorLocation,
    },
}
