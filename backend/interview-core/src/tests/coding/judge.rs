use crate::coding::judge::{Verdict, judge};

use models::{LanguageKey, RunResult};

#[test]
fn given_matching_output_when_judged_then_pass() {
    let result = RunResult::completed(LanguageKey::Python, "0 1\n", "", 12);
    assert_eq!(judge(&result, Some("0 1")), Verdict::Pass);
}

/// **VALUE**: Verifies Windows line endings and surrounding whitespace do not fail a correct answer.
///
/// **BUG THIS CATCHES**: Would catch a strict byte comparison failing `"3\r\n"` against `"3"`.
#[test]
fn given_crlf_and_padding_when_judged_then_pass() {
    let result = RunResult::completed(LanguageKey::Java, "a\r\nb\r\n", "", 40);
    assert_eq!(judge(&result, Some("  a\nb  ")), Verdict::Pass);
}

#[test]
fn given_wrong_output_when_judged_then_fail_with_both_sides() {
    let result = RunResult::completed(LanguageKey::Cpp, "-1\n", "", 5);

    let verdict = judge(&result, Some("3"));

    assert_eq!(
        verdict,
        Verdict::Fail {
            expected: "3".to_string(),
            actual: "-1".to_string(),
        }
    );
}

/// **VALUE**: Verifies stderr counts against the answer since it is part of the combined output.
#[test]
fn given_stderr_noise_when_judged_then_fail() {
    let result = RunResult::completed(LanguageKey::Python, "3", "Traceback", 5);
    assert!(matches!(judge(&result, Some("3")), Verdict::Fail { .. }));
}

#[test]
fn given_no_expected_output_when_judged_then_unchecked() {
    let result = RunResult::completed(LanguageKey::JavaScript, "anything", "", 1);
    assert_eq!(judge(&result, None), Verdict::Unchecked);
}
