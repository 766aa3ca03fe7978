//! Payloads exchanged with the security-analysis backend and the inbound route.

use crate::{ErrorLocation, ModelError};

use std::panic::Location;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisAction {
    Upload,
    Simulate,
    Report,
}

impl AnalysisAction {
    /// Resolves the optional `action` field.
    ///
    /// A missing or falsy action (`null`, `false`, `0`, `""`) means upload.
    /// Any other value must name one of the actions.
    #[track_caller]
    pub fn resolve(action: Option<&Value>) -> Result<Self, ModelError> {
        match action {
            None => Ok(AnalysisAction::Upload),
            Some(value) if !is_truthy(value) => Ok(AnalysisAction::Upload),
            Some(Value::String(raw)) => raw.parse(),
            Some(other) => Err(ModelError::Validation {
                message: format!("Invalid action specified: {other}"),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl FromStr for AnalysisAction {
    type Err = ModelError;

    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upload" | "" => Ok(AnalysisAction::Upload),
            "simulate" => Ok(AnalysisAction::Simulate),
            "report" => Ok(AnalysisAction::Report),
            _ => Err(ModelError::Validation {
                message: String::from("Invalid action specified"),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

/// Inbound body of the security-analysis route.
///
/// Fields are kept as raw JSON: callers send ids as numbers as often as
/// strings, and presence follows JSON truthiness rather than type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityAnalysisRequest {
    #[serde(default)]
    pub repo_url: Option<Value>,
    #[serde(default)]
    pub action: Option<Value>,
    #[serde(default)]
    pub repo_id: Option<Value>,
}

impl SecurityAnalysisRequest {
    /// `repo_url` when present and truthy.
    pub fn repo_url(&self) -> Option<&Value> {
        self.repo_url.as_ref().filter(|value| is_truthy(value))
    }

    /// `repo_id` when present and truthy.
    pub fn repo_id(&self) -> Option<&Value> {
        self.repo_id.as_ref().filter(|value| is_truthy(value))
    }
}

/// JSON truthiness: `null`, `false`, zero and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text form of an id for use in a URL path: strings as-is, anything else
/// as its JSON text (`42` → `"42"`).
pub fn id_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Body returned by the security-analysis route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SecurityAnalysisReply {
    Success {
        success: bool,
        message: String,
        data: Value,
    },
    Failure {
        error: String,
    },
}

impl SecurityAnalysisReply {
    pub fn success(message: impl Into<String>, data: Value) -> Self {
        SecurityAnalysisReply::Success {
            success: true,
            message: message.into(),
            data,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        SecurityAnalysisReply::Failure {
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRepoPayload {
    pub repo_url: String,
    pub repo_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulateAttackPayload {
    /// Sent exactly as the caller gave it.
    pub repo_id: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Unknown,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn parse(raw: Option<&str>) -> Severity {
        match raw.map(str::to_ascii_lowercase).as_deref() {
            Some("critical") => Severity::Critical,
            Some("high") => Severity::High,
            Some("medium") => Severity::Medium,
            Some("low") => Severity::Low,
            _ => Severity::Unknown,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReportSummary {
    #[serde(default)]
    pub overall_severity: Option<String>,
    #[serde(default)]
    pub critical_steps: Option<u32>,
    #[serde(default)]
    pub high_steps: Option<u32>,
    #[serde(default)]
    pub medium_steps: Option<u32>,
    #[serde(default)]
    pub low_steps: Option<u32>,
    #[serde(default)]
    pub affected_files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AttackStep {
    pub step_number: u32,
    pub technique: String,
    pub description: String,
    pub severity: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AttackPlan {
    #[serde(default)]
    pub attack_description: Option<String>,
    #[serde(default)]
    pub overall_severity: Option<String>,
    #[serde(default)]
    pub steps: Vec<AttackStep>,
}

/// Best-effort typed view over a report returned by the analysis backend.
///
/// Every field is optional; the backend is the system of record and its
/// shape is not ours to enforce.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AnalysisReport {
    #[serde(default)]
    pub repo_id: Option<String>,
    #[serde(default)]
    pub run_id: Option<String>,
    #[serde(default)]
    pub summary: Option<ReportSummary>,
    #[serde(default)]
    pub plan: Option<AttackPlan>,
}

impl AnalysisReport {
    /// Lenient parse: a payload that does not match yields an empty report.
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    /// Overall severity from the summary, falling back to the plan.
    pub fn overall_severity(&self) -> Severity {
        let summary = self
            .summary
            .as_ref()
            .and_then(|s| s.overall_severity.as_deref());
        let plan = self
            .plan
            .as_ref()
            .and_then(|p| p.overall_severity.as_deref());

        Severity::parse(summary.or(plan))
    }

    /// Highest severity among the attack plan's steps.
    pub fn worst_step(&self) -> Option<&AttackStep> {
        self.plan
            .as_ref()?
            .steps
            .iter()
            .max_by_key(|step| Severity::parse(Some(step.severity.as_str())))
    }
}
