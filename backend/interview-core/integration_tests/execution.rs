use interview_core::coding::Workbench;
use interview_core::error::execution::ExecutionError;
use interview_core::execution::{EXECUTION_TIMED_OUT, ExecutionClient};

use models::{LanguageKey, RunRequest};

use std::time::{Duration, Instant};

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Public API tests for the execution client
// ============================================================================

fn client_for(server: &MockServer) -> ExecutionClient {
    ExecutionClient::new(&format!("{}/api/v2/piston", server.uri())).unwrap()
}

fn run_body(stdout: &str, stderr: &str) -> serde_json::Value {
    json!({
        "language": "python",
        "version": "3.10.0",
        "run": { "stdout": stdout, "stderr": stderr, "code": 0, "signal": null }
    })
}

/// **VALUE**: Verifies stdout-only runs produce a clean result and the pinned runtime is sent.
///
/// **WHY THIS MATTERS**: The execution API picks the interpreter from `language` and
/// `version`; sending the editor key (`cpp`) instead of the runtime (`c++`) fails every run.
///
/// **BUG THIS CATCHES**: Would catch wrong runtime mapping, a dropped stdin, or
/// the endpoint path losing its `/piston` segment.
#[tokio::test]
async fn given_stdout_only_response_when_running_then_output_is_stdout() {
    // GIVEN: An API expecting the pinned python runtime
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/piston/execute"))
        .and(body_partial_json(json!({
            "language": "python",
            "version": "3.10.0",
            "stdin": "in",
            "files": [{ "name": "main", "content": "print(input())" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(run_body("A", "")))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);

    // WHEN: Running a python snippet
    let request = RunRequest::new(LanguageKey::Python, "print(input())").with_stdin("in");
    let result = client.run(&request).await;

    // THEN: Output is stdout, no errors
    assert_eq!(result.output, "A");
    assert_eq!(result.stdout, "A");
    assert!(result.stderr.is_empty());
    assert!(!result.has_errors());
    assert!(result.time_ms.is_some());
    assert_eq!(result.language, LanguageKey::Python);
}

#[tokio::test]
async fn given_stderr_only_response_when_running_then_output_is_stderr() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/piston/execute"))
        .respond_with(ResponseTemplate::new(200).set_body_json(run_body("", "B")))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .run(&RunRequest::new(LanguageKey::Python, "raise"))
        .await;

    assert_eq!(result.output, "B");
    assert_eq!(result.stderr, "B");
    assert!(result.has_errors());
}

#[tokio::test]
async fn given_both_streams_when_running_then_joined_with_newline() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/piston/execute"))
        .respond_with(ResponseTemplate::new(200).set_body_json(run_body("A", "B")))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .run(&RunRequest::new(LanguageKey::Python, "x"))
        .await;

    assert_eq!(result.output, "A\nB");
}

/// **VALUE**: Verifies a slow API yields "Execution timed out" instead of hanging or erroring.
///
/// **BUG THIS CATCHES**: Would catch the timeout being ignored, or a timeout surfacing
/// as a transport error string the UI does not recognise.
#[tokio::test]
async fn given_slow_api_when_running_then_timed_out_result() {
    // GIVEN: An API slower than the client timeout
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/piston/execute"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(run_body("late", ""))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;
    let client = client_for(&server).with_timeout(Duration::from_millis(100));

    // WHEN: Running
    let result = client
        .run(&RunRequest::new(LanguageKey::JavaScript, "while(true){}"))
        .await;

    // THEN: Timed out result, no output from the late response
    assert_eq!(result.stderr, EXECUTION_TIMED_OUT);
    assert_eq!(result.output, EXECUTION_TIMED_OUT);
    assert!(result.stdout.is_empty());
    assert!(result.time_ms.is_none());
}

/// **VALUE**: Verifies upstream errors become a displayable result carrying status and body.
#[tokio::test]
async fn given_upstream_error_when_running_then_error_result_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/piston/execute"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .run(&RunRequest::new(LanguageKey::Java, "class Main {}"))
        .await;

    assert!(result.has_errors());
    assert!(result.output.contains("429"), "got {}", result.output);
    assert!(result.output.contains("rate limited"), "got {}", result.output);
}

#[tokio::test]
async fn given_unreachable_api_when_running_then_error_result() {
    // Port 9 (discard) is not expected to be listening.
    let client = ExecutionClient::new("http://127.0.0.1:9/api")
        .unwrap()
        .with_timeout(Duration::from_secs(5));

    let result = client
        .run(&RunRequest::new(LanguageKey::Cpp, "int main(){}"))
        .await;

    assert!(result.has_errors());
    assert!(result.stdout.is_empty());
}

/// **VALUE**: Verifies an unsupported language fails before any network call.
///
/// **BUG THIS CATCHES**: Would catch the language being parsed lazily after the
/// request was already sent.
#[tokio::test]
async fn given_unsupported_language_when_run_named_then_error_and_no_request() {
    // GIVEN: An API that must not be called
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(run_body("", "")))
        .expect(0)
        .mount(&server)
        .await;

    // WHEN: Running with an unknown language
    let result = client_for(&server)
        .run_named("cobol", "DISPLAY 'HI'", None, None)
        .await;

    // THEN: Unsupported language error
    match result {
        Err(ExecutionError::UnsupportedLanguage { language, .. }) => assert_eq!(language, "cobol"),
        other => panic!("Expected UnsupportedLanguage, got {other:?}"),
    }
}

#[tokio::test]
async fn given_explicit_version_when_run_named_then_version_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/piston/execute"))
        .and(body_partial_json(json!({ "language": "c++", "version": "*" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(run_body("ok", "")))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .run_named("cpp", "int main(){}", None, Some("*".to_string()))
        .await
        .unwrap();

    assert_eq!(result.output, "ok");
}

#[tokio::test]
async fn given_runtimes_endpoint_when_listing_then_runtimes_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/piston/runtimes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "language": "python", "version": "3.10.0", "aliases": ["py"] },
            { "language": "javascript", "version": "18.15.0", "aliases": ["node-javascript"], "runtime": "node" }
        ])))
        .mount(&server)
        .await;

    let runtimes = client_for(&server).list_runtimes().await;

    assert_eq!(runtimes.len(), 2);
    assert_eq!(runtimes[0].language, "python");
    assert_eq!(runtimes[1].runtime.as_deref(), Some("node"));
}

/// **VALUE**: Verifies runtime listing failures degrade to an empty list.
#[tokio::test]
async fn given_runtimes_failure_when_listing_then_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/piston/runtimes"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(client_for(&server).list_runtimes().await.is_empty());
}

/// **VALUE**: Verifies overlapping runs are independent requests that proceed in parallel.
///
/// **WHY THIS MATTERS**: A candidate can press "Run" again while a run is pending;
/// each press is its own request with no queue or dedupe in the client.
///
/// **BUG THIS CATCHES**: Would catch a shared lock serializing runs (total time of two
/// delays) or a dedupe dropping the second identical request.
#[tokio::test]
async fn given_two_overlapping_runs_when_joined_then_both_sent_concurrently() {
    // GIVEN: An API that takes 500ms per run
    let server = MockServer::start().await;
    let delay = Duration::from_millis(500);
    Mock::given(method("POST"))
        .and(path("/api/v2/piston/execute"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(run_body("A", ""))
                .set_delay(delay),
        )
        .expect(2)
        .mount(&server)
        .await;
    let client = client_for(&server);
    let request = RunRequest::new(LanguageKey::Python, "print('A')");

    // WHEN: Running the same request twice at once
    let started = Instant::now();
    let (first, second) = tokio::join!(client.run(&request), client.run(&request));
    let elapsed = started.elapsed();

    // THEN: Both requests reached the API and finished in about one delay
    assert_eq!(first.output, "A");
    assert_eq!(second.output, "A");
    let received = server.received_requests().await.unwrap_or_default();
    assert_eq!(received.len(), 2);
    assert!(
        elapsed < delay * 2,
        "Runs were serialized: took {elapsed:?} for two {delay:?} runs"
    );
}

/// **VALUE**: Verifies a workbench run dropped mid-flight does not lock the editor.
///
/// **WHY THIS MATTERS**: Leaving the coding round cancels the pending run; coming back
/// must allow running again.
///
/// **BUG THIS CATCHES**: Would catch the pending flag staying set after cancellation,
/// so every later run is refused as "already in progress".
#[tokio::test]
async fn given_workbench_run_cancelled_when_running_again_then_run_allowed() {
    // GIVEN: A slow API and a playground workbench
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/piston/execute"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(run_body("A", ""))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;
    let client = client_for(&server);
    let mut workbench = Workbench::playground();

    // WHEN: The run future is dropped before the API answers
    let cancelled = tokio::time::timeout(Duration::from_millis(100), workbench.run(&client)).await;

    // THEN: The run is no longer pending and a new one can start
    assert!(cancelled.is_err());
    assert!(!workbench.is_running());
    assert!(workbench.begin_run().is_some());
}
