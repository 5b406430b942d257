//! Utterance type: an ordered, immutable sequence of tokens.

use serde::{Deserialize, Serialize};

use crate::analysis::Language;
use crate::analysis::token::Token;

/// A tokenized representation of one input sentence.
///
/// Utterances are immutable once built: all accessors borrow, and the token
/// sequence is fixed at construction time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    tokens: Vec<Token>,
    language: Language,
}

impl Utterance {
    /// Create a new utterance from a token sequence and a language code.
    pub fn new(tokens: Vec<Token>, language: Language) -> Self {
        Utterance { tokens, language }
    }

    /// Get the tokens of this utterance.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Get the language of this utterance.
    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Reconstruct the surface text of this utterance.
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    /// Number of tokens, including whitespace and punctuation.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check whether the utterance has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of word tokens.
    pub fn word_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_word).count()
    }

    /// Iterate over the word tokens.
    pub fn words(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.is_word)
    }

    /// Lowercase forms of the word tokens, in order.
    pub fn lowercase_words(&self) -> Vec<&str> {
        self.words().map(|t| t.lower.as_str()).collect()
    }
}
