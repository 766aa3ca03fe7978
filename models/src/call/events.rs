use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Agent,
    User,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::Agent => "agent",
            Speaker::User => "user",
        }
    }
}

/// One utterance of the running transcript.
///
/// `role` is kept as the raw string the voice SDK sends so unknown roles
/// survive deserialization; [`TranscriptEntry::speaker`] maps the known ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: String,
    pub content: String,
}

impl TranscriptEntry {
    pub fn new(speaker: Speaker, content: impl Into<String>) -> Self {
        Self {
            role: speaker.as_str().to_string(),
            content: content.into(),
        }
    }

    pub fn speaker(&self) -> Option<Speaker> {
        match self.role.as_str() {
            "agent" => Some(Speaker::Agent),
            "user" => Some(Speaker::User),
            _ => None,
        }
    }
}

/// Lifecycle and transcript events fired by the voice SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CallEvent {
    CallStarted,
    CallEnded,
    AgentStartTalking,
    AgentStopTalking,
    Update {
        #[serde(default)]
        transcript: Vec<TranscriptEntry>,
    },
    Error {
        message: String,
    },
}
