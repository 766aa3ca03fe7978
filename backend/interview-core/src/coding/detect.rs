use models::LanguageKey;

use once_cell::sync::Lazy;
use regex::Regex;

const PYTHON_PATTERN: &str = r"(?im)^#!/usr/bin/(env )?python|^import\s+sys|def\s+\w+\(";
const CPP_PATTERN: &str = r"(?im)^(#include\s+<)|std::|using\s+namespace";
const JAVA_PATTERN: &str = r"(?i)class\s+\w+\s*\{|public\s+class|System\.out\.println";

/// Checked in order; the first match wins.
static DETECTION_RULES: Lazy<Vec<(LanguageKey, Regex)>> = Lazy::new(|| {
    [
        (LanguageKey::Python, PYTHON_PATTERN),
        (LanguageKey::Cpp, CPP_PATTERN),
        (LanguageKey::Java, JAVA_PATTERN),
    ]
    .into_iter()
    .map(|(language, pattern)| (language, Regex::new(pattern).expect("valid regex pattern")))
    .collect()
});

/// Guesses the language of a snippet, defaulting to JavaScript.
pub fn detect_language(code: &str) -> LanguageKey {
    let trimmed = code.trim();
    DETECTION_RULES
        .iter()
        .find(|(_, rule)| rule.is_match(trimmed))
        .map(|(language, _)| *language)
        .unwrap_or(LanguageKey::JavaScript)
}
