//! Token types for utterance analysis.
//!
//! A [`Token`] is the atomic lexical unit of an utterance. Unlike a search
//! index token it carries no positional offsets; what matters for intent
//! classification is the surface form, its lowercase normalization, a
//! tf-idf-like term weight, and whether the token is a word at all.
//!
//! # Examples
//!
//! ```
//! use sagaris::analysis::token::Token;
//!
//! let token = Token::word("Hello").with_term_weight(0.8);
//! assert_eq!(token.text, "Hello");
//! assert_eq!(token.lower, "hello");
//! assert!(token.is_word);
//! assert!(!token.is_whitespace);
//! ```

use serde::{Deserialize, Serialize};

/// A single lexical unit of an utterance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The surface text of the token.
    pub text: String,

    /// The lowercase normalized form of the token.
    pub lower: String,

    /// A tf-idf-like informativeness weight assigned at analysis time.
    ///
    /// Low values mark tokens that carry little signal for distinguishing
    /// intents; the none-intent synthesizer samples from them.
    pub term_weight: f64,

    /// Whether the token is a word (as opposed to punctuation or whitespace).
    pub is_word: bool,

    /// Whether the token is whitespace.
    pub is_whitespace: bool,
}

impl Token {
    /// Create a new word token with a neutral term weight.
    pub fn word<S: Into<String>>(text: S) -> Self {
        let text = text.into();
        let lower = text.to_lowercase();
        Token {
            text,
            lower,
            term_weight: 1.0,
            is_word: true,
            is_whitespace: false,
        }
    }

    /// Create a new whitespace token.
    pub fn whitespace<S: Into<String>>(text: S) -> Self {
        let text = text.into();
        let lower = text.clone();
        Token {
            text,
            lower,
            term_weight: 0.0,
            is_word: false,
            is_whitespace: true,
        }
    }

    /// Create a new punctuation token.
    pub fn punctuation<S: Into<String>>(text: S) -> Self {
        let text = text.into();
        let lower = text.clone();
        Token {
            text,
            lower,
            term_weight: 0.0,
            is_word: false,
            is_whitespace: false,
        }
    }

    /// Set the term weight for this token.
    pub fn with_term_weight(mut self, weight: f64) -> Self {
        self.term_weight = weight;
        self
    }

    /// Get the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_token() {
        let token = Token::word("Hello");
        assert_eq!(token.text, "Hello");
        assert_eq!(token.lower, "hello");
        assert!(token.is_word);
        assert!(!token.is_whitespace);
        assert_eq!(token.term_weight, 1.0);
    }

    #[test]
    fn test_whitespace_token() {
        let token = Token::whitespace("  ");
        assert!(token.is_whitespace);
        assert!(!token.is_word);
    }

    #[test]
    fn test_punctuation_token() {
        let token = Token::punctuation("!");
        assert!(!token.is_word);
        assert!(!token.is_whitespace);
    }

    #[test]
    fn test_term_weight_builder() {
        let token = Token::word("rare").with_term_weight(2.5);
        assert_eq!(token.term_weight, 2.5);
    }
}
