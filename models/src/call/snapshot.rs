use crate::{InterviewSettings, Speaker};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallPhase {
    /// Waiting for the candidate to start.
    Idle,
    /// The candidate already responded or is not on the allow-list.
    Ineligible,
    InCall,
    CodingRound,
    Ended,
}

/// Everything the call screen renders, as one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSnapshot {
    pub phase: CallPhase,
    pub is_started: bool,
    pub is_calling: bool,
    pub active_turn: Option<Speaker>,
    pub last_interviewer_response: String,
    pub last_user_response: String,
    pub elapsed_secs: u64,
    pub interview_duration_secs: u64,
    pub coding_elapsed_secs: u64,
    pub coding_duration_secs: u64,
    pub editor_open: bool,
    pub camera_on: bool,
    pub call_id: Option<String>,
    pub tab_switch_count: u32,
    pub completion_persisted: bool,
}

impl CallSnapshot {
    pub fn new(settings: &InterviewSettings) -> Self {
        Self {
            phase: CallPhase::Idle,
            is_started: false,
            is_calling: false,
            active_turn: None,
            last_interviewer_response: String::new(),
            last_user_response: String::new(),
            elapsed_secs: 0,
            interview_duration_secs: settings.duration_secs(),
            coding_elapsed_secs: 0,
            coding_duration_secs: settings.coding_round_secs(),
            editor_open: false,
            camera_on: false,
            call_id: None,
            tab_switch_count: 0,
            completion_persisted: false,
        }
    }

    pub fn is_ended(&self) -> bool {
        self.phase == CallPhase::Ended
    }

    /// Fraction of the spoken interview elapsed, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.is_ended() || self.interview_duration_secs == 0 {
            return 1.0;
        }
        (self.elapsed_secs as f64 / self.interview_duration_secs as f64).min(1.0)
    }

    /// Seconds left in the coding round; negative once time is up.
    pub fn coding_remaining_secs(&self) -> i64 {
        self.coding_duration_secs as i64 - self.coding_elapsed_secs as i64
    }
}
