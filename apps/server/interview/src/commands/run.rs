use crate::cli::RunArgs;
use crate::commands::{Context, write_json};
use crate::error::InterviewError;

use common::ErrorLocation;
use interview_core::coding::{ProblemCatalog, Verdict, detect_language, judge};
use interview_core::error::execution::ExecutionError;
use interview_core::execution::ExecutionClient;
use models::{LanguageKey, RunRequest, RunResult};

use std::io::Write;
use std::panic::Location;

use log::{debug, info};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct SampleReport<'a> {
    sample: usize,
    verdict: &'static str,
    expected: Option<&'a str>,
    result: RunResult,
}

/// Runs the file once, or once per problem sample with `--problem`.
///
/// Returns `Ok(false)` when the program reported errors or a sample failed.
pub async fn execute<W: Write>(
    context: &Context,
    args: &RunArgs,
    out: &mut W,
) -> Result<bool, InterviewError> {
    let code = std::fs::read_to_string(&args.file)?;
    let language = resolve_language(args.language.as_deref(), &code)?;
    let client = context.execution_client()?;

    let mut request = RunRequest::new(language, code);
    request.version = args.version.clone();

    match &args.problem {
        Some(key) => run_problem(context, &client, request, key, out).await,
        None => {
            if let Some(path) = &args.stdin_file {
                request.stdin = Some(std::fs::read_to_string(path)?);
            }
            run_once(context, &client, &request, out).await
        }
    }
}

#[track_caller]
fn resolve_language(explicit: Option<&str>, code: &str) -> Result<LanguageKey, InterviewError> {
    match explicit {
        Some(name) => Ok(name.parse::<LanguageKey>().map_err(ExecutionError::from)?),
        None => {
            let detected = detect_language(code);
            info!("Detected language: {detected}");
            Ok(detected)
        }
    }
}

async fn run_once<W: Write>(
    context: &Context,
    client: &ExecutionClient,
    request: &RunRequest,
    out: &mut W,
) -> Result<bool, InterviewError> {
    let result = client.run(request).await;
    let ok = !result.has_errors();

    if context.json {
        write_json(out, &result)?;
        return Ok(ok);
    }

    if !result.output.is_empty() {
        writeln!(out, "{}", result.output)?;
    }
    match result.time_ms {
        Some(ms) => writeln!(out, "{} ({ms}ms)", result.status_line())?,
        None => writeln!(out, "{}", result.status_line())?,
    }

    Ok(ok)
}

async fn run_problem<W: Write>(
    context: &Context,
    client: &ExecutionClient,
    request: RunRequest,
    key: &str,
    out: &mut W,
) -> Result<bool, InterviewError> {
    let catalog = ProblemCatalog::load(&context.config_dir)?;
    let problem = catalog.get(key).ok_or_else(|| InterviewError::Interview {
        message: format!("Unknown problem '{key}'"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    if !context.json {
        writeln!(out, "{}", problem.title)?;
    }

    let mut reports = Vec::with_capacity(problem.samples.len());
    let mut all_passed = true;

    for (index, sample) in problem.samples.iter().enumerate() {
        let number = index + 1;
        let mut sample_request = request.clone();
        sample_request.stdin = Some(sample.stdin.clone());

        debug!("Running sample {number} of {key}");
        let result = client.run(&sample_request).await;
        let verdict = judge(&result, sample.expected.as_deref());

        let label = match &verdict {
            Verdict::Pass => "pass",
            Verdict::Fail { .. } => "fail",
            Verdict::Unchecked => "unchecked",
        };
        if matches!(verdict, Verdict::Fail { .. }) || result.has_errors() {
            all_passed = false;
        }

        if !context.json {
            match &verdict {
                Verdict::Pass => writeln!(out, "Sample {number}: PASS")?,
                Verdict::Unchecked => {
                    writeln!(out, "Sample {number}: UNCHECKED")?;
                    writeln!(out, "  output:   {}", result.output)?;
                }
                Verdict::Fail { expected, actual } => {
                    writeln!(out, "Sample {number}: FAIL")?;
                    writeln!(out, "  expected: {expected}")?;
                    writeln!(out, "  actual:   {actual}")?;
                }
            }
        }

        reports.push(SampleReport {
            sample: number,
            verdict: label,
            expected: sample.expected.as_deref(),
            result,
        });
    }

    if context.json {
        write_json(out, &reports)?;
    }

    info!(
        "Problem {key}: {} samples, {}",
        reports.len(),
        if all_passed { "all passed" } else { "failures" }
    );
    Ok(all_passed)
}
