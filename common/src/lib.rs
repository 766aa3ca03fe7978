//! Shared primitives for the interview platform.
//!
//! This crate holds the small building blocks every other crate leans on:
//! error locations, HTTP status classification and redacted secrets. It has
//! no I/O and no knowledge of the interview domain.
//!
//! ## Architecture
//!
//! - **common** (this crate): Cross-cutting primitives
//! - **models**: Pure data structures
//! - **interview-core**: Business logic operating on models
//! - **interview**: Binary wiring everything together

pub mod error;
pub mod http_status;
pub mod redacted_token;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_token::RedactedToken;
