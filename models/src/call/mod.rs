//! Interview call data: voice SDK events, session records and the
//! controller's read model.

pub mod events;
pub mod session;
pub mod settings_builder;
pub mod snapshot;

pub use events::{CallEvent, Speaker, TranscriptEntry};
pub use session::{
    CallRegistration, CallRegistrationRequest, Candidate, DynamicData, InterviewSettings,
    NewResponse, SessionCompletion,
};
pub use settings_builder::InterviewSettingsBuilder;
pub use snapshot::{CallPhase, CallSnapshot};
