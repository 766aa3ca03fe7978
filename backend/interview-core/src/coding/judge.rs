use models::RunResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail { expected: String, actual: String },
    /// The sample has no expected output.
    Unchecked,
}

/// Compares a run's combined output with a sample's expected output.
///
/// Both sides are trimmed and CRLF line endings normalized.
pub fn judge(result: &RunResult, expected: Option<&str>) -> Verdict {
    let Some(expected) = expected else {
        return Verdict::Unchecked;
    };

    let expected = normalize(expected);
    let actual = normalize(&result.output);

    if expected == actual {
        Verdict::Pass
    } else {
        Verdict::Fail { expected, actual }
    }
}

fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n").trim().to_string()
}
