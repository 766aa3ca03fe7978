use crate::analysis::client::{AnalysisClient, extract_detail};

/// **VALUE**: Verifies the upstream `detail` string is surfaced to the caller.
///
/// **WHY THIS MATTERS**: The backend explains failures (e.g. "Repository not found") in
/// `detail`; swallowing it leaves the candidate with a generic message.
#[test]
fn given_json_detail_string_when_extracting_then_detail_returned() {
    let body = r#"{"detail":"Repository not found"}"#;
    assert_eq!(extract_detail(body, "fallback"), "Repository not found");
}

/// **VALUE**: Verifies structured `detail` values are kept as JSON text.
///
/// **BUG THIS CATCHES**: Would catch validation error arrays being dropped in favor
/// of the fallback.
#[test]
fn given_json_detail_array_when_extracting_then_json_text_returned() {
    let body = r#"{"detail":[{"msg":"field required"}]}"#;
    assert_eq!(
        extract_detail(body, "fallback"),
        r#"[{"msg":"field required"}]"#
    );
}

#[test]
fn given_plain_text_body_when_extracting_then_body_returned() {
    assert_eq!(
        extract_detail("Internal Server Error", "fallback"),
        "Internal Server Error"
    );
}

#[test]
fn given_empty_body_when_extracting_then_fallback_returned() {
    assert_eq!(extract_detail("", "Failed to get report"), "Failed to get report");
    assert_eq!(extract_detail("  \n", "Failed to get report"), "Failed to get report");
}

/// **VALUE**: Verifies a JSON error body without a usable `detail` gets the action's
/// generic message.
///
/// **WHY THIS MATTERS**: The backend's other JSON fields are internal; the caller is
/// shown either the backend's explanation or our own message, never raw JSON.
///
/// **BUG THIS CATCHES**: Would catch `{"message":"bad repo"}` or `{"detail":""}` being
/// relayed verbatim as the error text.
#[test]
fn given_json_body_without_usable_detail_when_extracting_then_fallback_returned() {
    assert_eq!(
        extract_detail(r#"{"message":"bad repo"}"#, "Failed to upload repository"),
        "Failed to upload repository"
    );
    assert_eq!(extract_detail(r#"{"detail":""}"#, "fallback"), "fallback");
    assert_eq!(extract_detail(r#"{"detail":null}"#, "fallback"), "fallback");
    assert_eq!(extract_detail(r#"{"detail":false}"#, "fallback"), "fallback");
    assert_eq!(extract_detail(r#""just a string""#, "fallback"), "fallback");
}

/// **VALUE**: Verifies the report URL encodes the repo id as a single path segment.
///
/// **BUG THIS CATCHES**: Would catch an id containing `/` escaping into extra path
/// segments and fetching another repository's report.
#[test]
fn given_repo_id_when_building_report_url_then_single_encoded_segment() {
    // GIVEN: A client with a base path
    let client = AnalysisClient::new("http://localhost:8000/api").unwrap();

    // WHEN: Building report URLs
    let plain = client.report_url("acme-widget").unwrap();
    let hostile = client.report_url("a/b").unwrap();

    // THEN: The id occupies exactly one segment
    assert_eq!(
        plain.as_str(),
        "http://localhost:8000/api/reports/acme-widget/latest"
    );
    assert_eq!(
        hostile.as_str(),
        "http://localhost:8000/api/reports/a%2Fb/latest"
    );
}
