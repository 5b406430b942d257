//! Junk-word generation for the synthetic none intent.
//!
//! Junk words look like the training vocabulary (same character inventory,
//! similar lengths) but are not real words of it. Mixed with stop words they
//! form utterances that are plausible in shape yet meaningless, which is what
//! the negative class needs.

use crate::analysis::Language;
use crate::resources::rng::SeededRng;

/// Capability for generating junk words resembling an observed vocabulary.
pub trait JunkWordGenerator: Send + Sync {
    /// Generate a set of junk words for `language`, seeded by `vocabulary`.
    ///
    /// All randomness must come from `rng` so that the output is
    /// deterministic for a fixed seed and vocabulary.
    fn generate(
        &self,
        vocabulary: &[String],
        language: &Language,
        rng: &mut SeededRng,
    ) -> Vec<String>;
}

/// Bounds on the number of junk words produced per training run.
const JUNK_WORD_BOUNDS: (usize, usize) = (20, 500);

/// Default junk-word generator.
///
/// Samples each junk word character by character from the character
/// occurrences of the vocabulary, with a length drawn from the observed word
/// lengths. Generated words that collide with a real vocabulary word are
/// kept; they are rare and harmless in the negative class.
#[derive(Clone, Copy, Debug, Default)]
pub struct CharSampleJunkGenerator;

impl CharSampleJunkGenerator {
    /// Create a new generator.
    pub fn new() -> Self {
        CharSampleJunkGenerator
    }
}

impl JunkWordGenerator for CharSampleJunkGenerator {
    fn generate(
        &self,
        vocabulary: &[String],
        _language: &Language,
        rng: &mut SeededRng,
    ) -> Vec<String> {
        // Character and length inventories, in vocabulary order so that
        // sampling stays deterministic.
        let chars: Vec<char> = vocabulary.iter().flat_map(|w| w.chars()).collect();
        let lengths: Vec<usize> = vocabulary
            .iter()
            .map(|w| w.chars().count())
            .filter(|&len| len > 0)
            .collect();

        if chars.is_empty() || lengths.is_empty() {
            return Vec::new();
        }

        let (min_words, max_words) = JUNK_WORD_BOUNDS;
        let count = vocabulary.len().clamp(min_words, max_words);

        (0..count)
            .map(|_| {
                let length = lengths[rng.uniform(0.0, lengths.len() as f64) as usize];
                (0..length)
                    .map(|_| chars[rng.uniform(0.0, chars.len() as f64) as usize])
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vec<String> {
        ["flight", "book", "hotel", "ticket", "reserve"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let generator = CharSampleJunkGenerator::new();
        let language = Language::new("en");
        let a = generator.generate(&vocab(), &language, &mut SeededRng::from_seed(9));
        let b = generator.generate(&vocab(), &language, &mut SeededRng::from_seed(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_uses_vocabulary_characters_only() {
        let generator = CharSampleJunkGenerator::new();
        let language = Language::new("en");
        let words = generator.generate(&vocab(), &language, &mut SeededRng::from_seed(3));
        assert!(!words.is_empty());
        let inventory: Vec<char> = vocab().iter().flat_map(|w| w.chars()).collect();
        for word in &words {
            assert!(word.chars().all(|c| inventory.contains(&c)));
        }
    }

    #[test]
    fn test_empty_vocabulary_yields_nothing() {
        let generator = CharSampleJunkGenerator::new();
        let language = Language::new("en");
        let words = generator.generate(&[], &language, &mut SeededRng::from_seed(3));
        assert!(words.is_empty());
    }

    #[test]
    fn test_count_respects_lower_bound() {
        let generator = CharSampleJunkGenerator::new();
        let language = Language::new("en");
        let words = generator.generate(&vocab(), &language, &mut SeededRng::from_seed(3));
        assert!(words.len() >= 20);
    }
}
