use std::sync::OnceLock;

use chrono::Utc;
use regex::Regex;

const OWNER_REPO_PATTERN: &str = r"github\.com/([^/]+)/([^/]+)";
const GITHUB_REPO_URL_PATTERN: &str = r"^https?://(www\.)?github\.com/[\w-]+/[\w.-]+/?$";
const REPO_ID_DISALLOWED_PATTERN: &str = r"[^a-zA-Z0-9_-]";
const FALLBACK_REPO_ID_PREFIX: &str = "repo-";
const GIT_SUFFIX: &str = ".git";

static OWNER_REPO_REGEX: OnceLock<Regex> = OnceLock::new();
static GITHUB_REPO_URL_REGEX: OnceLock<Regex> = OnceLock::new();
static REPO_ID_DISALLOWED_REGEX: OnceLock<Regex> = OnceLock::new();

fn owner_repo_regex() -> &'static Regex {
    OWNER_REPO_REGEX.get_or_init(|| Regex::new(OWNER_REPO_PATTERN).expect("valid regex pattern"))
}

fn github_repo_url_regex() -> &'static Regex {
    GITHUB_REPO_URL_REGEX
        .get_or_init(|| Regex::new(GITHUB_REPO_URL_PATTERN).expect("valid regex pattern"))
}

fn repo_id_disallowed_regex() -> &'static Regex {
    REPO_ID_DISALLOWED_REGEX
        .get_or_init(|| Regex::new(REPO_ID_DISALLOWED_PATTERN).expect("valid regex pattern"))
}

/// Stable identifier for a repository URL.
///
/// `https://github.com/acme/widget` becomes `acme-widget`; characters outside
/// `[A-Za-z0-9_-]` are replaced by `-`. URLs without an owner/repo pair get
/// `repo-<epoch millis>`.
pub fn derive_repo_id(repo_url: &str) -> String {
    match owner_repo_regex().captures(repo_url) {
        Some(caps) => {
            let raw = format!("{}-{}", &caps[1], &caps[2]);
            repo_id_disallowed_regex()
                .replace_all(&raw, "-")
                .into_owned()
        }
        None => format!("{FALLBACK_REPO_ID_PREFIX}{}", Utc::now().timestamp_millis()),
    }
}

/// Whether the URL points at the root of a GitHub repository.
pub fn is_github_repo_url(url: &str) -> bool {
    github_repo_url_regex().is_match(url)
}

/// Owner and repository name, with a trailing `.git` dropped.
pub fn parse_owner_repo(url: &str) -> Option<(String, String)> {
    let caps = owner_repo_regex().captures(url)?;
    let owner = caps[1].to_string();
    let repo = caps[2].strip_suffix(GIT_SUFFIX).unwrap_or(&caps[2]).to_string();
    Some((owner, repo))
}
