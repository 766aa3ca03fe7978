use common::RedactedToken;

use serde::{Deserialize, Serialize};

/// Default spoken interview length when the interview does not set one.
pub const DEFAULT_INTERVIEW_MINUTES: u32 = 1;

/// Default coding round length.
pub const DEFAULT_CODING_ROUND_MINUTES: u32 = 45;

fn default_interview_minutes() -> u32 {
    DEFAULT_INTERVIEW_MINUTES
}

fn default_coding_round_minutes() -> u32 {
    DEFAULT_CODING_ROUND_MINUTES
}

/// The interview a candidate is about to take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewSettings {
    pub id: String,
    pub interviewer_id: String,
    #[serde(default)]
    pub objective: String,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default = "default_interview_minutes")]
    pub duration_minutes: u32,
    #[serde(default = "default_coding_round_minutes")]
    pub coding_round_minutes: u32,
    /// Allow-list of candidate emails. `None` means anyone may respond.
    #[serde(default)]
    pub respondents: Option<Vec<String>>,
    #[serde(default)]
    pub is_anonymous: bool,
}

impl InterviewSettings {
    pub fn duration_secs(&self) -> u64 {
        u64::from(self.duration_minutes) * 60
    }

    pub fn coding_round_secs(&self) -> u64 {
        u64::from(self.coding_round_minutes) * 60
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl Candidate {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Variables injected into the voice agent's prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicData {
    pub mins: String,
    pub objective: String,
    pub questions: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRegistrationRequest {
    pub dynamic_data: DynamicData,
    pub interviewer_id: String,
}

impl CallRegistrationRequest {
    pub fn new(settings: &InterviewSettings, candidate: &Candidate) -> Self {
        let name = if candidate.name.is_empty() {
            String::from("not provided")
        } else {
            candidate.name.clone()
        };

        Self {
            dynamic_data: DynamicData {
                mins: settings.duration_minutes.to_string(),
                objective: settings.objective.clone(),
                questions: settings.questions.join(", "),
                name,
            },
            interviewer_id: settings.interviewer_id.clone(),
        }
    }
}

/// Result of registering a call with the voice provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CallRegistration {
    pub call_id: String,
    pub access_token: RedactedToken,
}

/// Response record created when the call starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewResponse {
    pub interview_id: String,
    pub call_id: String,
    pub email: String,
    pub name: String,
}

/// Saved once when the session reaches its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCompletion {
    pub is_ended: bool,
    pub tab_switch_count: u32,
}
