use interview::cli::{RepoIdArgs, RunArgs, ServeArgs};
use interview::commands::{self, Context};
use interview::error::InterviewError;

use interview_core::config::AppConfig;

use std::path::Path;

use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Command tests against a mocked execution API
// These drive the same functions main() dispatches to and capture their output
// ============================================================================

fn context(config_dir: &Path, execution_url: &str, json: bool) -> Context {
    let mut config = AppConfig::default();
    config.execution.api_url = execution_url.to_string();
    config.execution.timeout = "5s".to_string();
    Context {
        config,
        config_dir: config_dir.to_path_buf(),
        json,
    }
}

fn run_args(file: &Path) -> RunArgs {
    RunArgs {
        file: file.to_path_buf(),
        language: None,
        stdin_file: None,
        version: None,
        problem: None,
    }
}

fn piston_reply(stdout: &str, stderr: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "language": "python",
        "version": "3.10.0",
        "run": { "stdout": stdout, "stderr": stderr, "code": 0 }
    }))
}

fn text(out: Vec<u8>) -> String {
    String::from_utf8(out).unwrap()
}

/// **VALUE**: Verifies `run` detects the language, sends stdin and prints output with status.
///
/// **BUG THIS CATCHES**: Would catch detection not being applied when `--language` is
/// omitted, or the stdin file not reaching the execution API.
#[tokio::test]
async fn given_python_file_when_run_then_output_and_status_printed() {
    // GIVEN: A python file, an stdin file and an API expecting both
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("main.py");
    std::fs::write(&file, "import sys\nprint(sys.stdin.read())").unwrap();
    let stdin = temp.path().join("in.txt");
    std::fs::write(&stdin, "hello").unwrap();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/execute"))
        .and(body_partial_json(json!({ "language": "python", "stdin": "hello" })))
        .respond_with(piston_reply("hello\n", ""))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(temp.path(), &server.uri(), false);
    let mut args = run_args(&file);
    args.stdin_file = Some(stdin);

    // WHEN: Running
    let mut out = Vec::new();
    let ok = commands::run::execute(&ctx, &args, &mut out).await.unwrap();

    // THEN: Output then status
    assert!(ok);
    let printed = text(out);
    assert!(printed.starts_with("hello\n"), "got {printed}");
    assert!(printed.contains("Execution finished."), "got {printed}");
}

#[tokio::test]
async fn given_program_error_when_run_with_json_then_result_json_and_not_ok() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("main.js");
    std::fs::write(&file, "throw new Error('x')").unwrap();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/execute"))
        .respond_with(piston_reply("", "Error: x"))
        .mount(&server)
        .await;

    let ctx = context(temp.path(), &server.uri(), true);
    let mut out = Vec::new();
    let ok = commands::run::execute(&ctx, &run_args(&file), &mut out)
        .await
        .unwrap();

    assert!(!ok);
    let json: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["stderr"], "Error: x");
    assert_eq!(json["language"], "javascript");
}

/// **VALUE**: Verifies an unsupported `--language` fails before any request.
#[tokio::test]
async fn given_unsupported_language_when_run_then_core_error() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("main.rb");
    std::fs::write(&file, "puts 1").unwrap();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(piston_reply("", ""))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = context(temp.path(), &server.uri(), false);
    let mut args = run_args(&file);
    args.language = Some("ruby".to_string());

    let err = commands::run::execute(&ctx, &args, &mut Vec::new())
        .await
        .unwrap_err();

    assert!(matches!(err, InterviewError::Core { .. }));
    assert!(err.to_string().contains("ruby"));
}

#[tokio::test]
async fn given_missing_file_when_run_then_io_error() {
    let temp = TempDir::new().unwrap();
    let ctx = context(temp.path(), "http://127.0.0.1:9", false);

    let args = run_args(&temp.path().join("nope.py"));

    let err = commands::run::execute(&ctx, &args, &mut Vec::new())
        .await
        .unwrap_err();

    assert!(matches!(err, InterviewError::Io { .. }));
}

/// **VALUE**: Verifies `--problem` runs every sample and judges each one.
///
/// **WHY THIS MATTERS**: This is how a candidate's solution is checked against the
/// catalog; a wrong verdict misgrades the candidate.
#[tokio::test]
async fn given_problem_when_run_then_each_sample_judged() {
    // GIVEN: An API answering the first binary search sample right and the second wrong
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("solution.py");
    std::fs::write(&file, "def solve():\n    pass").unwrap();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/execute"))
        .and(body_partial_json(json!({ "stdin": "5\n1 3 5 7 9\n7" })))
        .respond_with(piston_reply("3\n", ""))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/execute"))
        .and(body_partial_json(json!({ "stdin": "4\n2 4 6 8\n3" })))
        .respond_with(piston_reply("0\n", ""))
        .mount(&server)
        .await;

    let ctx = context(temp.path(), &server.uri(), false);
    let mut args = run_args(&file);
    args.problem = Some("binarySearch".to_string());

    // WHEN: Running against the problem
    let mut out = Vec::new();
    let ok = commands::run::execute(&ctx, &args, &mut out).await.unwrap();

    // THEN: One pass, one fail with both sides shown
    assert!(!ok);
    let printed = text(out);
    assert!(printed.contains("Binary Search"), "got {printed}");
    assert!(printed.contains("Sample 1: PASS"), "got {printed}");
    assert!(printed.contains("Sample 2: FAIL"), "got {printed}");
    assert!(printed.contains("expected: -1"), "got {printed}");
    assert!(printed.contains("actual:   0"), "got {printed}");
}

#[tokio::test]
async fn given_unknown_problem_when_run_then_interview_error() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("a.js");
    std::fs::write(&file, "console.log(1)").unwrap();
    let ctx = context(temp.path(), "http://127.0.0.1:9", false);
    let mut args = run_args(&file);
    args.problem = Some("noSuchProblem".to_string());

    let err = commands::run::execute(&ctx, &args, &mut Vec::new())
        .await
        .unwrap_err();

    assert!(matches!(err, InterviewError::Interview { .. }));
}

#[tokio::test]
async fn given_runtimes_api_when_listing_then_one_line_per_runtime() {
    let temp = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/runtimes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "language": "python", "version": "3.10.0", "aliases": ["py", "python3"] },
            { "language": "java", "version": "15.0.2", "aliases": [] }
        ])))
        .mount(&server)
        .await;
    let ctx = context(temp.path(), &server.uri(), false);

    let mut out = Vec::new();
    commands::runtimes::execute(&ctx, &mut out).await.unwrap();

    assert_eq!(text(out), "python 3.10.0 (py, python3)\njava 15.0.2\n");
}

#[test]
fn given_github_url_when_repo_id_then_id_printed() {
    let temp = TempDir::new().unwrap();
    let ctx = context(temp.path(), "http://127.0.0.1:9", false);
    let args = RepoIdArgs {
        url: "https://github.com/acme/widget".to_string(),
    };

    let mut out = Vec::new();
    commands::repo_id::execute(&ctx, &args, &mut out).unwrap();

    assert_eq!(text(out), "acme-widget\n");
}

#[test]
fn given_git_url_when_repo_id_with_json_then_owner_and_repo_reported() {
    let temp = TempDir::new().unwrap();
    let ctx = context(temp.path(), "http://127.0.0.1:9", true);
    let args = RepoIdArgs {
        url: "https://github.com/acme/widget.git".to_string(),
    };

    let mut out = Vec::new();
    commands::repo_id::execute(&ctx, &args, &mut out).unwrap();

    let json: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["repo_id"], "acme-widget-git");
    assert_eq!(json["owner"], "acme");
    assert_eq!(json["repo"], "widget");
    assert_eq!(json["is_github_repo"], true);
}

#[test]
fn given_default_catalog_when_listing_problems_then_all_listed() {
    let temp = TempDir::new().unwrap();
    let ctx = context(temp.path(), "http://127.0.0.1:9", true);

    let mut out = Vec::new();
    commands::problems::execute(&ctx, &mut out).unwrap();

    let json: Value = serde_json::from_slice(&out).unwrap();
    let problems = json.as_array().unwrap();
    assert_eq!(problems.len(), 10);
    assert_eq!(problems[0]["key"], "twoSum");
}

/// **VALUE**: Verifies `serve` binds from config and stops when the shutdown future resolves.
#[tokio::test]
async fn given_serve_when_shutdown_resolves_then_returns_ok() {
    let temp = TempDir::new().unwrap();
    let mut ctx = context(temp.path(), "http://127.0.0.1:9", false);
    ctx.config.server.bind_addr = "127.0.0.1:0".to_string();

    let result = commands::serve::execute(&ctx, &ServeArgs::default(), async {}).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn given_bind_override_when_serving_then_listens_on_override() {
    let temp = TempDir::new().unwrap();
    let ctx = context(temp.path(), "http://127.0.0.1:9", false);
    let args = ServeArgs {
        bind: Some("127.0.0.1:0".to_string()),
    };

    let handle = commands::serve::start(&ctx, &args).await.unwrap();
    let response = reqwest::get(format!("http://{}/health", handle.local_addr()))
        .await
        .unwrap();
    let status = response.status();
    drop(response);
    handle.shutdown().await.unwrap();

    assert!(status.is_success(), "got {status}");
}
