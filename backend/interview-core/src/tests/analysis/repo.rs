use crate::analysis::repo::{derive_repo_id, is_github_repo_url, parse_owner_repo};

/// **VALUE**: Verifies GitHub URLs map to a stable `owner-repo` identifier.
///
/// **WHY THIS MATTERS**: The analysis backend keys reports by repo id. An unstable id
/// means "report" can never find what "upload" stored.
///
/// **BUG THIS CATCHES**: Would catch the capture groups being swapped or the separator changing.
#[test]
fn given_github_url_when_deriving_repo_id_then_owner_dash_repo() {
    // GIVEN: A plain GitHub repository URL
    let url = "https://github.com/acme/widget";

    // WHEN: Deriving the id
    let id = derive_repo_id(url);

    // THEN: Owner and repo joined by a dash
    assert_eq!(id, "acme-widget");
    assert_eq!(derive_repo_id(url), id, "Derivation must be deterministic");
}

/// **VALUE**: Verifies characters outside `[A-Za-z0-9_-]` are replaced.
///
/// **BUG THIS CATCHES**: Would catch a `.git` suffix or dotted names leaking dots into
/// the id, which the backend rejects as a path component.
#[test]
fn given_repo_name_with_dots_when_deriving_repo_id_then_dots_replaced() {
    assert_eq!(
        derive_repo_id("https://github.com/acme/widget.git"),
        "acme-widget-git"
    );
    assert_eq!(derive_repo_id("github.com/my.org/a_b-c"), "my-org-a_b-c");
}

/// **VALUE**: Verifies non-GitHub URLs fall back to a timestamped id.
#[test]
fn given_non_github_url_when_deriving_repo_id_then_timestamp_fallback() {
    // GIVEN: A URL with no owner/repo pair
    let url = "https://gitlab.com/acme";

    // WHEN: Deriving the id
    let id = derive_repo_id(url);

    // THEN: `repo-` followed by epoch millis
    let millis = id.strip_prefix("repo-").expect("fallback prefix");
    assert!(!millis.is_empty());
    assert!(millis.chars().all(|c| c.is_ascii_digit()), "got {id}");
}

#[test]
fn given_urls_when_checking_github_repo_url_then_only_repo_roots_match() {
    assert!(is_github_repo_url("https://github.com/acme/widget"));
    assert!(is_github_repo_url("http://www.github.com/acme/widget.rs/"));
    assert!(!is_github_repo_url("https://github.com/acme"));
    assert!(!is_github_repo_url("https://github.com/acme/widget/tree/main"));
    assert!(!is_github_repo_url("https://gitlab.com/acme/widget"));
}

#[test]
fn given_git_suffix_when_parsing_owner_repo_then_suffix_dropped() {
    assert_eq!(
        parse_owner_repo("https://github.com/acme/widget.git"),
        Some(("acme".to_string(), "widget".to_string()))
    );
    assert_eq!(parse_owner_repo("https://example.com/x"), None);
}
