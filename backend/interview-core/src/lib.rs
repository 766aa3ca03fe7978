//! Behaviour of the interview platform services.
//!
//! - [`execution`]: remote code-execution client
//! - [`analysis`]: security-analysis forwarder and its upstream client
//! - [`server`]: the inbound HTTP surface
//! - [`call`]: interview call flow controller
//! - [`coding`]: coding-round workbench and problem catalog
//! - [`config`]: persisted settings and environment overrides

pub mod analysis;
pub mod call;
pub mod coding;
pub mod config;
pub mod error;
pub mod execution;
pub mod server;

mod base_url;


use std::time::Duration;

pub const EXECUTION_API_HOSTNAME: &str = "emkc.org";
pub const DEFAULT_EXECUTION_API_URL: &str =
    const_format::concatcp!("https://", EXECUTION_API_HOSTNAME, "/api/v2/piston");

pub const ANALYSIS_API_HOSTNAME: &str = "localhost";
pub const ANALYSIS_API_PORT: u16 = 8000;
pub const DEFAULT_ANALYSIS_API_URL: &str =
    const_format::concatcp!("http://", ANALYSIS_API_HOSTNAME, ":", ANALYSIS_API_PORT);

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

pub const DEFAULT_EXECUTION_TIMEOUT: Duration = Duration::from_secs(20);
