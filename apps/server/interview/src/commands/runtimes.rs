use crate::commands::{Context, write_json};
use crate::error::InterviewError;

use std::io::Write;

use log::warn;

pub async fn execute<W: Write>(context: &Context, out: &mut W) -> Result<(), InterviewError> {
    let client = context.execution_client()?;
    let runtimes = client.list_runtimes().await;

    if runtimes.is_empty() {
        warn!("No runtimes reported by {}", client.base_url());
    }

    if context.json {
        return write_json(out, &runtimes);
    }

    for runtime in &runtimes {
        if runtime.aliases.is_empty() {
            writeln!(out, "{} {}", runtime.language, runtime.version)?;
        } else {
            writeln!(
                out,
                "{} {} ({})",
                runtime.language,
                runtime.version,
                runtime.aliases.join(", ")
            )?;
        }
    }

    Ok(())
}
