use crate::{ErrorLocation, ModelError};

use std::fmt;
use std::panic::Location;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Languages the coding round can execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageKey {
    JavaScript,
    Python,
    Cpp,
    Java,
}

impl LanguageKey {
    pub const ALL: [LanguageKey; 4] = [
        LanguageKey::JavaScript,
        LanguageKey::Python,
        LanguageKey::Cpp,
        LanguageKey::Java,
    ];

    /// The key used on the wire and in the UI selector.
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageKey::JavaScript => "javascript",
            LanguageKey::Python => "python",
            LanguageKey::Cpp => "cpp",
            LanguageKey::Java => "java",
        }
    }

    /// Runtime identifier understood by the execution API.
    pub fn runtime(&self) -> &'static str {
        match self {
            LanguageKey::JavaScript => "js",
            LanguageKey::Python => "python",
            LanguageKey::Cpp => "c++",
            LanguageKey::Java => "java",
        }
    }

    /// Pinned runtime version used when the caller does not ask for one.
    pub fn default_version(&self) -> &'static str {
        match self {
            LanguageKey::JavaScript => "18.15.0",
            LanguageKey::Python => "3.10.0",
            LanguageKey::Cpp => "10.2.0",
            LanguageKey::Java => "15.0.2",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LanguageKey::JavaScript => "JavaScript",
            LanguageKey::Python => "Python",
            LanguageKey::Cpp => "C++",
            LanguageKey::Java => "Java",
        }
    }
}

impl fmt::Display for LanguageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageKey {
    type Err = ModelError;

    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LanguageKey::ALL
            .into_iter()
            .find(|language| language.as_str() == s)
            .ok_or_else(|| ModelError::UnsupportedLanguage {
                language: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
