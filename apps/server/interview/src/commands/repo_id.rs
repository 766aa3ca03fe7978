use crate::cli::RepoIdArgs;
use crate::commands::{Context, write_json};
use crate::error::InterviewError;

use interview_core::analysis::{derive_repo_id, is_github_repo_url, parse_owner_repo};

use std::io::Write;

use serde::Serialize;

#[derive(Debug, Serialize)]
struct RepoIdReport<'a> {
    url: &'a str,
    repo_id: String,
    is_github_repo: bool,
    owner: Option<String>,
    repo: Option<String>,
}

pub fn execute<W: Write>(
    context: &Context,
    args: &RepoIdArgs,
    out: &mut W,
) -> Result<(), InterviewError> {
    let repo_id = derive_repo_id(&args.url);

    if !context.json {
        writeln!(out, "{repo_id}")?;
        return Ok(());
    }

    let (owner, repo) = parse_owner_repo(&args.url).unzip();
    write_json(
        out,
        &RepoIdReport {
            url: &args.url,
            repo_id,
            is_github_repo: is_github_repo_url(&args.url),
            owner,
            repo,
        },
    )
}
