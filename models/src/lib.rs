//! Domain models for the interview platform.
//!
//! This crate contains pure data structures representing the core
//! concepts in our application. Models have no I/O - they're just data
//! (plus the small amount of derivation that belongs to the data itself,
//! such as combining stdout and stderr into a display string).
//!
//! ## Architecture
//!
//! - **models** (this crate): Pure data structures
//! - **interview-core**: Business logic operating on models
//! - **interview**: Binary wiring everything together

pub mod analysis;
pub mod call;
pub mod error;
pub mod execution;
pub mod language;

pub use analysis::{
    AnalysisAction, AnalysisReport, SecurityAnalysisReply, SecurityAnalysisRequest, Severity,
    SimulateAttackPayload, UploadRepoPayload, id_text, is_truthy,
};
pub use call::{
    CallEvent, CallPhase, CallRegistration, CallRegistrationRequest, CallSnapshot, Candidate,
    DynamicData, InterviewSettings, InterviewSettingsBuilder, NewResponse, SessionCompletion,
    Speaker, TranscriptEntry,
};
pub use common::ErrorLocation;
pub use error::model_error::ModelError;
pub use execution::{ExecutePayload, ExecuteResponse, RunRequest, RunResult, Runtime};
pub use language::LanguageKey;

#[cfg(test)]
mod tests;
