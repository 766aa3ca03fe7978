//! Pure interview call state machine.
//!
//! Inputs are voice SDK events, one-second ticks and UI actions. Outputs are
//! the updated [`CallSnapshot`] plus [`CallEffect`]s for the caller to carry
//! out. The machine never performs I/O.

use crate::call::transcript::{asks_about_camera, camera_reply, latest_lines};

use models::{CallEvent, CallPhase, CallSnapshot, InterviewSettings, SessionCompletion, Speaker};

use std::time::Duration;

use log::{debug, info, warn};

/// Delay before the coding round opens once the interview time runs out.
pub const EXPIRY_TRANSITION_DELAY: Duration = Duration::from_secs(2);

/// Delay before the coding round opens after the candidate ends the call.
pub const MANUAL_END_TRANSITION_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallEffect {
    StopVoiceCall,
    /// Open the coding round after the delay via [`CallMachine::open_coding_round`].
    ScheduleCodingRound(Duration),
    PersistCompletion {
        call_id: String,
        completion: SessionCompletion,
    },
}

#[derive(Debug, Clone)]
pub struct CallMachine {
    snapshot: CallSnapshot,
    coding_round_scheduled: bool,
}

impl CallMachine {
    pub fn new(settings: &InterviewSettings) -> Self {
        Self {
            snapshot: CallSnapshot::new(settings),
            coding_round_scheduled: false,
        }
    }

    pub fn snapshot(&self) -> &CallSnapshot {
        &self.snapshot
    }

    pub fn phase(&self) -> CallPhase {
        self.snapshot.phase
    }

    pub fn progress(&self) -> f64 {
        self.snapshot.progress()
    }

    pub fn handle_event(&mut self, event: CallEvent) -> Vec<CallEffect> {
        let mut effects = Vec::new();

        match event {
            CallEvent::CallStarted => {
                debug!("Call started");
                self.snapshot.is_calling = true;
            }
            CallEvent::CallEnded => {
                debug!("Call ended, waiting for coding round");
                self.snapshot.is_calling = false;
            }
            CallEvent::AgentStartTalking => self.snapshot.active_turn = Some(Speaker::Agent),
            CallEvent::AgentStopTalking => self.snapshot.active_turn = Some(Speaker::User),
            CallEvent::Update { transcript } => {
                let lines = latest_lines(&transcript);
                let user = lines.user.unwrap_or_default();

                self.snapshot.last_interviewer_response = if asks_about_camera(&user) {
                    camera_reply(self.snapshot.camera_on).to_string()
                } else {
                    lines.agent.unwrap_or_default()
                };
                self.snapshot.last_user_response = user;
            }
            CallEvent::Error { message } => {
                warn!("Voice call error: {message}");
                self.snapshot.is_calling = false;
                if !self.snapshot.is_ended() {
                    effects.push(CallEffect::StopVoiceCall);
                    self.finish(&mut effects);
                }
            }
        }

        effects
    }

    /// Advances the clocks by one second.
    pub fn tick(&mut self) -> Vec<CallEffect> {
        let mut effects = Vec::new();

        match self.snapshot.phase {
            CallPhase::InCall if self.snapshot.is_calling => {
                self.snapshot.elapsed_secs += 1;

                if self.snapshot.elapsed_secs >= self.snapshot.interview_duration_secs
                    && !self.coding_round_scheduled
                {
                    info!(
                        "Interview time ended after {}s, stopping call",
                        self.snapshot.elapsed_secs
                    );
                    self.snapshot.is_calling = false;
                    self.coding_round_scheduled = true;
                    effects.push(CallEffect::StopVoiceCall);
                    effects.push(CallEffect::ScheduleCodingRound(EXPIRY_TRANSITION_DELAY));
                }
            }
            CallPhase::CodingRound if self.snapshot.editor_open => {
                self.snapshot.coding_elapsed_secs += 1;
            }
            _ => {}
        }

        effects
    }

    /// Candidate already responded or is not on the allow-list.
    pub fn mark_ineligible(&mut self) {
        if self.snapshot.phase == CallPhase::Idle {
            self.snapshot.phase = CallPhase::Ineligible;
        }
    }

    /// The call was registered and the voice call started.
    pub fn mark_started(&mut self, call_id: impl Into<String>) {
        if self.snapshot.phase != CallPhase::Idle {
            warn!("Ignoring start in phase {:?}", self.snapshot.phase);
            return;
        }
        self.snapshot.phase = CallPhase::InCall;
        self.snapshot.is_started = true;
        self.snapshot.is_calling = true;
        self.snapshot.call_id = Some(call_id.into());
    }

    /// Candidate pressed "end call".
    pub fn end_call(&mut self) -> Vec<CallEffect> {
        let mut effects = Vec::new();

        match self.snapshot.phase {
            CallPhase::InCall => {
                if !self.coding_round_scheduled {
                    self.snapshot.is_calling = false;
                    self.coding_round_scheduled = true;
                    effects.push(CallEffect::StopVoiceCall);
                    effects.push(CallEffect::ScheduleCodingRound(MANUAL_END_TRANSITION_DELAY));
                }
            }
            CallPhase::Idle | CallPhase::Ineligible => self.finish(&mut effects),
            CallPhase::CodingRound | CallPhase::Ended => {}
        }

        effects
    }

    /// Fired when a scheduled coding round transition comes due.
    pub fn open_coding_round(&mut self) {
        if self.snapshot.phase != CallPhase::InCall {
            debug!(
                "Not opening coding round from phase {:?}",
                self.snapshot.phase
            );
            return;
        }
        info!("Opening coding round");
        self.snapshot.phase = CallPhase::CodingRound;
        self.snapshot.editor_open = true;
    }

    /// Resumes the coding clock.
    pub fn open_editor(&mut self) {
        if self.snapshot.phase == CallPhase::CodingRound {
            self.snapshot.editor_open = true;
        }
    }

    /// Pauses the coding clock.
    pub fn close_editor(&mut self) {
        self.snapshot.editor_open = false;
    }

    pub fn end_coding_round(&mut self) -> Vec<CallEffect> {
        let mut effects = Vec::new();
        if self.snapshot.phase == CallPhase::CodingRound {
            self.finish(&mut effects);
        }
        effects
    }

    pub fn set_camera_on(&mut self, on: bool) {
        self.snapshot.camera_on = on;
    }

    pub fn record_tab_switch(&mut self) {
        self.snapshot.tab_switch_count += 1;
    }

    fn finish(&mut self, effects: &mut Vec<CallEffect>) {
        self.snapshot.phase = CallPhase::Ended;
        self.snapshot.is_calling = false;
        self.snapshot.editor_open = false;

        if self.snapshot.completion_persisted {
            return;
        }

        if let Some(call_id) = self.snapshot.call_id.clone() {
            self.snapshot.completion_persisted = true;
            effects.push(CallEffect::PersistCompletion {
                call_id,
                completion: SessionCompletion {
                    is_ended: true,
                    tab_switch_count: self.snapshot.tab_switch_count,
                },
            });
        }
    }
}
