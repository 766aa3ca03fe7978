//! Security-analysis forwarding.
//!
//! The analysis backend is the system of record; nothing here keeps state
//! between the upload, simulate and report actions.

pub mod client;
pub mod forwarder;
pub mod repo;

pub use client::AnalysisClient;
pub use forwarder::{ForwardReply, SecurityAnalysisForwarder};
pub use repo::{derive_repo_id, is_github_repo_url, parse_owner_repo};
