//! Coding round: language detection, sample programs, the problem catalog
//! and the editor workbench that drives the execution client.

pub mod detect;
pub mod judge;
pub mod problems;
pub mod samples;
pub mod workbench;

pub use detect::detect_language;
pub use judge::{Verdict, judge};
pub use problems::{Difficulty, Problem, ProblemCatalog, Sample};
pub use samples::sample_program;
pub use workbench::Workbench;
