use crate::call::session::{DEFAULT_CODING_ROUND_MINUTES, DEFAULT_INTERVIEW_MINUTES};
use crate::{ErrorLocation, InterviewSettings, ModelError};

use std::panic::Location;

/// Builder for validated [`InterviewSettings`].
#[derive(Debug, Default)]
pub struct InterviewSettingsBuilder {
    id: Option<String>,
    interviewer_id: Option<String>,
    objective: Option<String>,
    questions: Vec<String>,
    duration_minutes: Option<u32>,
    coding_round_minutes: Option<u32>,
    respondents: Option<Vec<String>>,
    is_anonymous: bool,
}

impl InterviewSettingsBuilder {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_interviewer_id(mut self, interviewer_id: impl Into<String>) -> Self {
        self.interviewer_id = Some(interviewer_id.into());
        self
    }

    pub fn with_objective(mut self, objective: impl Into<String>) -> Self {
        self.objective = Some(objective.into());
        self
    }

    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.questions.push(question.into());
        self
    }

    pub fn with_duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    pub fn with_coding_round_minutes(mut self, minutes: u32) -> Self {
        self.coding_round_minutes = Some(minutes);
        self
    }

    pub fn with_respondents<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.respondents = Some(emails.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_anonymous(mut self, anonymous: bool) -> Self {
        self.is_anonymous = anonymous;
        self
    }

    /// Build the settings with validation.
    #[track_caller]
    pub fn build(self) -> Result<InterviewSettings, ModelError> {
        let id = self.id.ok_or_else(|| ModelError::Validation {
            message: String::from("Interview ID is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if id.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Interview ID cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let interviewer_id = self.interviewer_id.ok_or_else(|| ModelError::Validation {
            message: String::from("Interviewer ID is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if interviewer_id.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Interviewer ID cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let duration_minutes = self.duration_minutes.unwrap_or(DEFAULT_INTERVIEW_MINUTES);
        if duration_minutes == 0 {
            return Err(ModelError::Validation {
                message: String::from("Interview duration must be non-zero"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let coding_round_minutes = self
            .coding_round_minutes
            .unwrap_or(DEFAULT_CODING_ROUND_MINUTES);
        if coding_round_minutes == 0 {
            return Err(ModelError::Validation {
                message: String::from("Coding round duration must be non-zero"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(InterviewSettings {
            id,
            interviewer_id,
            objective: self.objective.unwrap_or_default(),
            questions: self.questions,
            duration_minutes,
            coding_round_minutes,
            respondents: self.respondents,
            is_anonymous: self.is_anonymous,
        })
    }
}
