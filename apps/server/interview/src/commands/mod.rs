//! Subcommand implementations.
//!
//! Each command writes its output to the given writer so tests can capture
//! it; logging goes to stderr and the log file.

pub mod problems;
pub mod repo_id;
pub mod run;
pub mod runtimes;
pub mod serve;

use crate::error::InterviewError;

use interview_core::config::AppConfig;
use interview_core::execution::ExecutionClient;

use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;

/// Resolved settings shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: AppConfig,
    pub config_dir: PathBuf,
    pub json: bool,
}

impl Context {
    pub fn execution_client(&self) -> Result<ExecutionClient, InterviewError> {
        let timeout = self.config.execution_timeout()?;
        Ok(ExecutionClient::new(&self.config.execution.api_url)?.with_timeout(timeout))
    }
}

/// Pretty JSON followed by a newline.
pub(crate) fn write_json<W: Write, T: Serialize>(
    out: &mut W,
    value: &T,
) -> Result<(), InterviewError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
