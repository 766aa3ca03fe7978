use crate::coding::problems::ProblemCatalog;
use crate::coding::samples::sample_program;
use crate::coding::workbench::{HISTORY_LIMIT, Workbench};

use models::execution::LATEST_VERSION;
use models::{LanguageKey, RunResult};

#[test]
fn given_playground_when_created_then_javascript_sample_and_stdin() {
    let bench = Workbench::playground();

    assert_eq!(bench.language(), LanguageKey::JavaScript);
    assert_eq!(bench.code(), sample_program(LanguageKey::JavaScript));
    assert_eq!(bench.stdin(), "Hello\nWorld");
    assert!(bench.result().is_none());
}

/// **VALUE**: Verifies the interview editor always requests the latest runtime version.
#[test]
fn given_interview_editor_when_run_begins_then_latest_version_requested() {
    let mut bench = Workbench::interview_editor();

    let request = bench.begin_run().unwrap();

    assert_eq!(request.version.as_deref(), Some(LATEST_VERSION));
    assert_eq!(request.code, "// Write your solution here\n");
}

/// **VALUE**: Verifies a second run cannot start while one is pending.
///
/// **WHY THIS MATTERS**: Double-clicking "Run" would otherwise fire two execution
/// requests and race their results into the output pane.
#[test]
fn given_pending_run_when_begin_run_again_then_none() {
    // GIVEN: A run in flight
    let mut bench = Workbench::playground();
    assert!(bench.begin_run().is_some());
    assert!(bench.is_running());

    // WHEN: Starting another
    let second = bench.begin_run();

    // THEN: Refused
    assert!(second.is_none());

    // WHEN: The first finishes
    let status = bench.finish_run(RunResult::completed(LanguageKey::JavaScript, "ok", "", 3));

    // THEN: Status reported and runs allowed again
    assert_eq!(status, "Execution finished.");
    assert!(!bench.is_running());
    assert!(bench.begin_run().is_some());
}

#[test]
fn given_failed_run_when_finished_then_error_status() {
    let mut bench = Workbench::playground();
    bench.begin_run();

    let status = bench.finish_run(RunResult::failure(LanguageKey::JavaScript, "boom"));

    assert_eq!(status, "Execution finished with errors.");
    assert_eq!(bench.result().map(|r| r.output.as_str()), Some("boom"));
}

/// **VALUE**: Verifies history is newest first and bounded.
#[test]
fn given_many_runs_when_finished_then_history_bounded_newest_first() {
    let mut bench = Workbench::playground();

    for i in 0..(HISTORY_LIMIT + 5) {
        bench.begin_run();
        bench.finish_run(RunResult::completed(
            LanguageKey::JavaScript,
            i.to_string(),
            "",
            1,
        ));
    }

    let history: Vec<_> = bench.history().map(|r| r.stdout.clone()).collect();
    assert_eq!(history.len(), HISTORY_LIMIT);
    assert_eq!(history[0], (HISTORY_LIMIT + 4).to_string());
}

#[test]
fn given_interview_editor_when_changing_language_then_code_reset() {
    let mut bench = Workbench::interview_editor();
    bench.set_code("print(1)");

    bench.change_language(LanguageKey::Python);

    assert_eq!(bench.language(), LanguageKey::Python);
    assert_eq!(bench.code(), "// Write your solution in python\n");
}

#[test]
fn given_playground_when_setting_language_then_code_kept() {
    let mut bench = Workbench::playground();
    bench.set_code("x");

    bench.set_language(LanguageKey::Cpp);

    assert_eq!(bench.code(), "x");
}

#[test]
fn given_blank_code_when_auto_detecting_then_sample_loaded() {
    let mut bench = Workbench::playground();
    bench.set_code("  ");

    let detected = bench.auto_detect();

    assert_eq!(detected, LanguageKey::JavaScript);
    assert_eq!(bench.code(), sample_program(LanguageKey::JavaScript));
}

#[test]
fn given_python_code_when_auto_detecting_then_code_kept() {
    let mut bench = Workbench::playground();
    bench.set_code("import sys\nprint(sys.stdin.read())");

    assert_eq!(bench.auto_detect(), LanguageKey::Python);
    assert_eq!(bench.code(), "import sys\nprint(sys.stdin.read())");
}

#[test]
fn given_output_when_cleared_then_result_and_stdin_empty() {
    let mut bench = Workbench::playground();
    bench.begin_run();
    bench.finish_run(RunResult::completed(LanguageKey::JavaScript, "x", "", 1));

    bench.clear();

    assert!(bench.result().is_none());
    assert_eq!(bench.stdin(), "");
    assert_eq!(bench.history().count(), 1, "Clearing keeps history");
}

#[test]
fn given_catalog_when_selecting_problem_then_stdin_loaded() {
    let catalog = ProblemCatalog::embedded().unwrap();
    let mut bench = Workbench::interview_editor();

    assert!(bench.select_problem(&catalog, "binarySearch"));
    assert_eq!(bench.stdin(), "5\n1 3 5 7 9\n7");
    assert_eq!(bench.problem(), Some("binarySearch"));

    assert!(!bench.select_problem(&catalog, "missing"));
    assert_eq!(bench.problem(), Some("binarySearch"));
}
