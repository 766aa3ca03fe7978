use crate::coding::problems::{Difficulty, ProblemCatalog};
use crate::error::config::ConfigError;

use tempfile::TempDir;

/// **VALUE**: Verifies the embedded catalog parses and passes validation.
///
/// **WHY THIS MATTERS**: The embedded catalog is the fallback for every bad override.
/// If it fails to parse the coding round has no problems at all.
#[test]
fn given_embedded_catalog_when_loaded_then_ten_valid_problems() {
    // WHEN: Loading the embedded catalog
    let catalog = ProblemCatalog::embedded().unwrap();

    // THEN: All ten problems, first one is Two Sum
    assert_eq!(catalog.problems().len(), 10);
    let first = catalog.first().unwrap();
    assert_eq!(first.key, "twoSum");
    assert_eq!(first.difficulty, Difficulty::Easy);
    assert_eq!(catalog.default_stdin("twoSum"), Some("5\n2 7 11 15 1\n9"));
    assert_eq!(
        catalog.get("lruCache").map(|p| p.difficulty),
        Some(Difficulty::Medium)
    );
}

#[test]
fn given_unknown_key_when_looking_up_then_none() {
    let catalog = ProblemCatalog::embedded().unwrap();
    assert!(catalog.get("nope").is_none());
    assert!(catalog.default_stdin("nope").is_none());
}

#[test]
fn given_no_override_file_when_loading_then_embedded_catalog() {
    let temp = TempDir::new().unwrap();

    let catalog = ProblemCatalog::load(temp.path()).unwrap();

    assert_eq!(catalog, ProblemCatalog::embedded().unwrap());
}

/// **VALUE**: Verifies a valid override file replaces the embedded catalog.
#[test]
fn given_override_file_when_loading_then_override_used() {
    // GIVEN: A config dir with a one-problem catalog
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("problems.toml"),
        r#"
[[problems]]
key = "fizzBuzz"
title = "Fizz Buzz"
difficulty = "Easy"
description = "Print fizz buzz."

[[problems.samples]]
stdin = "3"
expected = "1\n2\nFizz"
"#,
    )
    .unwrap();

    // WHEN: Loading
    let catalog = ProblemCatalog::load(temp.path()).unwrap();

    // THEN: Only the override
    assert_eq!(catalog.problems().len(), 1);
    assert_eq!(catalog.default_stdin("fizzBuzz"), Some("3"));
}

/// **VALUE**: Verifies a broken override falls back instead of failing the coding round.
///
/// **BUG THIS CATCHES**: Would catch a typo in an operator's problems.toml taking the
/// whole coding round down.
#[test]
fn given_corrupt_override_file_when_loading_then_embedded_fallback() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("problems.toml"), "[[problems]\nkey = ").unwrap();

    let catalog = ProblemCatalog::load(temp.path()).unwrap();

    assert_eq!(catalog.problems().len(), 10);
}

/// **VALUE**: Verifies duplicate keys are rejected by validation.
#[test]
fn given_duplicate_keys_when_loading_override_then_embedded_fallback() {
    let temp = TempDir::new().unwrap();
    let problem = r#"
[[problems]]
key = "dup"
title = "Dup"
difficulty = "Medium"
description = "d"

[[problems.samples]]
stdin = "1"
"#;
    std::fs::write(temp.path().join("problems.toml"), format!("{problem}{problem}")).unwrap();

    let catalog = ProblemCatalog::load(temp.path()).unwrap();

    assert!(catalog.get("dup").is_none());
}

#[test]
fn given_problem_without_samples_when_validating_then_error() {
    let catalog: ProblemCatalog = toml::from_str(
        r#"
[[problems]]
key = "empty"
title = "Empty"
difficulty = "Hard"
description = "none"
"#,
    )
    .unwrap();

    let err = catalog.validate().unwrap_err();

    assert!(matches!(err, ConfigError::ValidationError { .. }));
    assert!(err.to_string().contains("has no samples"));
}
