//! Text analysis primitives for intent classification.
//!
//! This module defines the lexical units that flow through training and
//! prediction: [`token::Token`], [`utterance::Utterance`], the
//! [`tokenizer::UtteranceBuilder`] capability that turns raw text into
//! utterances, and the normalization used by the exact-match index.

pub mod normalize;
pub mod token;
pub mod tokenizer;
pub mod utterance;

pub use token::Token;
pub use utterance::Utterance;

use serde::{Deserialize, Serialize};

/// A language code (BCP-47-ish short code such as `"en"` or `"ja"`).
///
/// Languages are compared case-insensitively; the stored form is lowercase.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language(String);

impl Language {
    /// Create a new language code.
    pub fn new<S: AsRef<str>>(code: S) -> Self {
        Language(code.as_ref().to_lowercase())
    }

    /// Get the language code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Language {
    fn from(code: &str) -> Self {
        Language::new(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_is_lowercased() {
        assert_eq!(Language::new("EN"), Language::new("en"));
        assert_eq!(Language::new("Ja").as_str(), "ja");
    }
}
