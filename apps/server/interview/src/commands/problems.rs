use crate::commands::{Context, write_json};
use crate::error::InterviewError;

use interview_core::coding::ProblemCatalog;

use std::io::Write;

pub fn execute<W: Write>(context: &Context, out: &mut W) -> Result<(), InterviewError> {
    let catalog = ProblemCatalog::load(&context.config_dir)?;

    if context.json {
        return write_json(out, &catalog.problems());
    }

    for problem in catalog.problems() {
        writeln!(
            out,
            "{:<20} {:<7} {}",
            problem.key,
            format!("{:?}", problem.difficulty),
            problem.title
        )?;
    }

    Ok(())
}
