//! Request/response shapes for remote code execution.
//!
//! [`RunRequest`] and [`RunResult`] are what callers see. [`ExecutePayload`],
//! [`ExecuteResponse`] and [`Runtime`] mirror the execution API's wire format.

use crate::LanguageKey;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Version wildcard that lets the execution API pick the latest runtime.
pub const LATEST_VERSION: &str = "*";

/// Name given to the single source file sent for execution.
const SOURCE_FILE_NAME: &str = "main";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    pub language: LanguageKey,
    pub code: String,
    #[serde(default)]
    pub stdin: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl RunRequest {
    pub fn new(language: LanguageKey, code: impl Into<String>) -> Self {
        Self {
            language,
            code: code.into(),
            stdin: None,
            version: None,
        }
    }

    pub fn with_stdin(mut self, stdin: impl Into<String>) -> Self {
        self.stdin = Some(stdin.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Explicit version if one was given, otherwise the language's pinned one.
    pub fn effective_version(&self) -> &str {
        self.version
            .as_deref()
            .unwrap_or_else(|| self.language.default_version())
    }

    /// Builds the wire payload for the execution API.
    pub fn to_payload(&self) -> ExecutePayload {
        ExecutePayload {
            language: self.language.runtime().to_string(),
            version: self.effective_version().to_string(),
            files: vec![SourceFile {
                name: SOURCE_FILE_NAME.to_string(),
                content: self.code.clone(),
            }],
            stdin: self.stdin.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutePayload {
    pub language: String,
    pub version: String,
    pub files: Vec<SourceFile>,
    pub stdin: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExecuteStage {
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub signal: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExecuteResponse {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub run: Option<ExecuteStage>,
}

impl ExecuteResponse {
    pub fn stdout(&self) -> &str {
        self.run
            .as_ref()
            .and_then(|run| run.stdout.as_deref())
            .unwrap_or_default()
    }

    pub fn stderr(&self) -> &str {
        self.run
            .as_ref()
            .and_then(|run| run.stderr.as_deref())
            .unwrap_or_default()
    }
}

/// One entry of the execution API's runtime listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Runtime {
    pub language: String,
    pub version: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub runtime: Option<String>,
}

/// Normalized outcome of one execution. Always displayable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub stdout: String,
    pub stderr: String,
    /// stdout and stderr joined by a newline, empty parts skipped.
    pub output: String,
    /// Completion time, epoch milliseconds.
    pub ran_at: i64,
    pub language: LanguageKey,
    /// Wall-clock duration; absent when the run failed before completing.
    #[serde(default)]
    pub time_ms: Option<u64>,
}

impl RunResult {
    pub fn completed(
        language: LanguageKey,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
        time_ms: u64,
    ) -> Self {
        let stdout = stdout.into();
        let stderr = stderr.into();
        let output = combine_output(&stdout, &stderr);

        Self {
            stdout,
            stderr,
            output,
            ran_at: Utc::now().timestamp_millis(),
            language,
            time_ms: Some(time_ms),
        }
    }

    /// A run that never produced program output; the message stands in for stderr.
    pub fn failure(language: LanguageKey, message: impl Into<String>) -> Self {
        let message = message.into();

        Self {
            stdout: String::new(),
            stderr: message.clone(),
            output: message,
            ran_at: Utc::now().timestamp_millis(),
            language,
            time_ms: None,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.stderr.is_empty()
    }

    pub fn status_line(&self) -> &'static str {
        if self.has_errors() {
            "Execution finished with errors."
        } else {
            "Execution finished."
        }
    }
}

pub fn combine_output(stdout: &str, stderr: &str) -> String {
    [stdout, stderr]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
