//! Lexical resources consumed by the classifier.
//!
//! Stop words, part-of-speech availability, and junk-word generation are
//! capabilities of the host system. [`EmbeddedResources`] is the default
//! implementation, carrying stop-word tables for English and Japanese and a
//! POS-availability allowlist; hosts with richer linguistic backends plug in
//! their own [`LexicalResources`].

pub mod junk;
pub mod rng;

pub use junk::{CharSampleJunkGenerator, JunkWordGenerator};
pub use rng::SeededRng;

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::analysis::Language;

/// Capability for per-language lexical lookups.
pub trait LexicalResources: Send + Sync {
    /// Stop words for the given language. Empty when unknown.
    fn stop_words(&self, language: &Language) -> Vec<String>;

    /// Whether part-of-speech tagging is available for the language.
    ///
    /// The out-of-scope scorer is skipped when this returns `false`.
    fn is_pos_available(&self, language: &Language) -> bool;
}

/// Default English stop words list.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

const JAPANESE_STOP_WORDS: &[&str] = &[
    "の",
    "に",
    "は",
    "を",
    "た",
    "が",
    "で",
    "て",
    "と",
    "し",
    "れ",
    "さ",
    "ある",
    "いる",
    "も",
    "する",
    "から",
    "な",
    "こと",
    "として",
    "い",
    "や",
    "れる",
    "など",
    "ない",
    "この",
    "ため",
    "その",
    "よう",
    "また",
    "もの",
    "という",
    "まで",
    "なる",
    "へ",
    "か",
    "だ",
    "これ",
    "それ",
];

/// Languages with part-of-speech tagging support in the default backend.
static POS_LANGUAGES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut set = HashSet::new();
    set.insert("en");
    set
});

/// Built-in lexical resources.
///
/// Suitable for tests and small deployments; production hosts typically wire
/// in their own stop-word lists and POS backends.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbeddedResources;

impl EmbeddedResources {
    /// Create a new embedded resource provider.
    pub fn new() -> Self {
        EmbeddedResources
    }
}

impl LexicalResources for EmbeddedResources {
    fn stop_words(&self, language: &Language) -> Vec<String> {
        let table: &[&str] = match language.as_str() {
            "en" => ENGLISH_STOP_WORDS,
            "ja" => JAPANESE_STOP_WORDS,
            _ => &[],
        };
        table.iter().map(|w| w.to_string()).collect()
    }

    fn is_pos_available(&self, language: &Language) -> bool {
        POS_LANGUAGES.contains(language.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_words_per_language() {
        let resources = EmbeddedResources::new();
        let english = resources.stop_words(&Language::new("en"));
        assert!(english.contains(&"the".to_string()));

        let japanese = resources.stop_words(&Language::new("ja"));
        assert!(japanese.contains(&"の".to_string()));

        assert!(resources.stop_words(&Language::new("xx")).is_empty());
    }

    #[test]
    fn test_pos_availability() {
        let resources = EmbeddedResources::new();
        assert!(resources.is_pos_available(&Language::new("en")));
        assert!(!resources.is_pos_available(&Language::new("ja")));
    }
}
