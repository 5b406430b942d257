//! Synthesis of the negative "none" intent.
//!
//! No out-of-scope examples are ever provided by callers, so the negative
//! class is manufactured from the training corpus itself: junk words shaped
//! like the corpus vocabulary, stop words, and the corpus's own low-signal
//! words are mixed into utterances that look plausible but mean nothing.
//!
//! Every random draw comes from the [`SeededRng`] threaded in by the caller;
//! given the same seed and corpus the synthesized intent is byte-identical
//! across runs.

use ahash::AHashMap;

use crate::analysis::Language;
use crate::analysis::tokenizer::UtteranceBuilder;
use crate::analysis::utterance::Utterance;
use crate::classifier::types::{Intent, NONE_INTENT};
use crate::error::Result;
use crate::resources::rng::SeededRng;
use crate::resources::{JunkWordGenerator, LexicalResources};

/// Bounds on the number of synthetic utterances generated per batch.
pub const NONE_UTTERANCE_BOUNDS: (usize, usize) = (20, 200);

/// Term-weight threshold below which a word counts as low-signal vocabulary.
pub const LOW_SIGNAL_TFIDF: f64 = 0.5;

/// Fraction of whitespace token occurrences above which synthetic word
/// samples are joined with spaces instead of concatenated.
const WHITESPACE_JOIN_THRESHOLD: f64 = 0.3;

/// Builds the synthetic negative-class intent from a training corpus.
pub struct NoneIntentSynthesizer<'a> {
    resources: &'a dyn LexicalResources,
    junk: &'a dyn JunkWordGenerator,
    builder: &'a dyn UtteranceBuilder,
}

impl<'a> NoneIntentSynthesizer<'a> {
    /// Create a synthesizer over the given capabilities.
    pub fn new(
        resources: &'a dyn LexicalResources,
        junk: &'a dyn JunkWordGenerator,
        builder: &'a dyn UtteranceBuilder,
    ) -> Self {
        NoneIntentSynthesizer {
            resources,
            junk,
            builder,
        }
    }

    /// Synthesize the "none" intent from the corpus utterances.
    pub fn synthesize(
        &self,
        utterances: &[&Utterance],
        language: &Language,
        rng: &mut SeededRng,
    ) -> Result<Intent> {
        let stats = CorpusStats::gather(utterances);

        let (min_count, max_count) = NONE_UTTERANCE_BOUNDS;
        let target = ((utterances.len() as f64 * 2.0 / 3.0).round() as usize)
            .clamp(min_count, max_count);

        let junk_words = self.junk.generate(&stats.vocabulary, language, rng);
        let stop_words = self.resources.stop_words(language);
        let low_signal = stats.low_signal_vocabulary();

        let join = if stats.whitespace_fraction() >= WHITESPACE_JOIN_THRESHOLD {
            " "
        } else {
            ""
        };

        let pool_mixed = union(&stop_words, &low_signal);
        let pool_junk_stop = union(&junk_words, &stop_words);

        // Draw order is fixed: mixed, junk, junk+stop. Changing it would
        // change the outputs for a given seed.
        let batch_mixed = sample_batch(&pool_mixed, target, stats.avg_tokens, join, rng);
        let batch_junk = sample_batch(&junk_words, target, stats.avg_tokens, join, rng);
        let batch_junk_stop = sample_batch(&pool_junk_stop, target, stats.avg_tokens, join, rng);

        let mut texts = Vec::with_capacity(target * 3 + stop_words.len());
        texts.extend(batch_junk_stop);
        texts.extend(batch_mixed);
        texts.extend(batch_junk);
        texts.extend(stop_words.iter().cloned());
        texts.retain(|t| !t.is_empty());

        let utterances = self.builder.build_batch(&texts, language)?;
        Ok(Intent::new(NONE_INTENT, utterances))
    }
}

/// Aggregate lexical statistics of a training corpus.
struct CorpusStats {
    /// Distinct lowercase word vocabulary, in first-seen order.
    vocabulary: Vec<String>,
    /// Maximum observed term weight per distinct lowercase word.
    weights: AHashMap<String, f64>,
    /// Mean token count per utterance (all tokens, whitespace included).
    avg_tokens: f64,
    /// Total token occurrences across the corpus.
    total_tokens: usize,
    /// Whitespace token occurrences across the corpus.
    whitespace_tokens: usize,
}

impl CorpusStats {
    fn gather(utterances: &[&Utterance]) -> Self {
        let mut vocabulary = Vec::new();
        let mut weights: AHashMap<String, f64> = AHashMap::new();
        let mut total_tokens = 0usize;
        let mut whitespace_tokens = 0usize;

        for utterance in utterances {
            total_tokens += utterance.len();
            for token in utterance.tokens() {
                if token.is_whitespace {
                    whitespace_tokens += 1;
                }
                if token.is_word {
                    match weights.get_mut(&token.lower) {
                        Some(weight) => *weight = weight.max(token.term_weight),
                        None => {
                            weights.insert(token.lower.clone(), token.term_weight);
                            vocabulary.push(token.lower.clone());
                        }
                    }
                }
            }
        }

        let avg_tokens = if utterances.is_empty() {
            0.0
        } else {
            total_tokens as f64 / utterances.len() as f64
        };

        CorpusStats {
            vocabulary,
            weights,
            avg_tokens,
            total_tokens,
            whitespace_tokens,
        }
    }

    /// Distinct words whose weight is at or below the low-signal threshold,
    /// sorted lexicographically for scan-order independence.
    fn low_signal_vocabulary(&self) -> Vec<String> {
        let mut words: Vec<String> = self
            .vocabulary
            .iter()
            .filter(|word| {
                self.weights
                    .get(word.as_str())
                    .is_some_and(|w| *w <= LOW_SIGNAL_TFIDF)
            })
            .cloned()
            .collect();
        words.sort_unstable();
        words
    }

    fn whitespace_fraction(&self) -> f64 {
        if self.total_tokens == 0 {
            0.0
        } else {
            self.whitespace_tokens as f64 / self.total_tokens as f64
        }
    }
}

/// Union of two word lists, preserving order of first appearance.
fn union(first: &[String], second: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(first.len() + second.len());
    for word in first.iter().chain(second.iter()) {
        if !out.contains(word) {
            out.push(word.clone());
        }
    }
    out
}

/// Draw `count` synthetic texts from `pool`, each a without-replacement word
/// sample of length `round(uniform(1, 2 * avg_tokens))`.
fn sample_batch(
    pool: &[String],
    count: usize,
    avg_tokens: f64,
    join: &str,
    rng: &mut SeededRng,
) -> Vec<String> {
    if pool.is_empty() {
        return Vec::new();
    }
    let high = (2.0 * avg_tokens).max(1.0);
    (0..count)
        .map(|_| {
            let words = rng.uniform(1.0, high).round().max(1.0) as usize;
            rng.sample_without_replacement(pool, words).join(join)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tokenizer::RegexUtteranceBuilder;
    use crate::resources::{CharSampleJunkGenerator, EmbeddedResources};

    fn corpus(texts: &[&str], language: &Language) -> Vec<Utterance> {
        let builder = RegexUtteranceBuilder::new().unwrap();
        let texts: Vec<String> = texts.iter().map(|s| s.to_string()).collect();
        builder.build_batch(&texts, language).unwrap()
    }

    fn synthesize(texts: &[&str], language: &str, seed: u64) -> Intent {
        let language = Language::new(language);
        let utterances = corpus(texts, &language);
        let refs: Vec<&Utterance> = utterances.iter().collect();

        let resources = EmbeddedResources::new();
        let junk = CharSampleJunkGenerator::new();
        let builder = RegexUtteranceBuilder::new().unwrap();
        let synthesizer = NoneIntentSynthesizer::new(&resources, &junk, &builder);
        let mut rng = SeededRng::from_seed(seed);
        synthesizer.synthesize(&refs, &language, &mut rng).unwrap()
    }

    const TEXTS: &[&str] = &[
        "book a flight to paris",
        "book a hotel in rome",
        "book a table for two",
        "reserve a rental car",
        "find me a cheap flight",
    ];

    #[test]
    fn test_synthesized_intent_is_named_none() {
        let intent = synthesize(TEXTS, "en", 42);
        assert_eq!(intent.name, NONE_INTENT);
        assert!(intent.contexts.is_empty());
        assert!(intent.slot_names.is_empty());
        assert!(!intent.utterances.is_empty());
    }

    #[test]
    fn test_determinism_across_runs() {
        let a = synthesize(TEXTS, "en", 42);
        let b = synthesize(TEXTS, "en", 42);
        let texts_a: Vec<String> = a.utterances.iter().map(|u| u.text()).collect();
        let texts_b: Vec<String> = b.utterances.iter().map(|u| u.text()).collect();
        assert_eq!(texts_a, texts_b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = synthesize(TEXTS, "en", 1);
        let b = synthesize(TEXTS, "en", 2);
        let texts_a: Vec<String> = a.utterances.iter().map(|u| u.text()).collect();
        let texts_b: Vec<String> = b.utterances.iter().map(|u| u.text()).collect();
        assert_ne!(texts_a, texts_b);
    }

    #[test]
    fn test_batch_size_bounds() {
        // 5 corpus utterances: round(2/3 * 5) = 3 clamps up to 20 per batch.
        let intent = synthesize(TEXTS, "en", 7);
        let stop_count = EmbeddedResources::new()
            .stop_words(&Language::new("en"))
            .len();
        // Three batches of 20 plus the raw stop-word list, minus any empty
        // texts filtered out.
        assert!(intent.utterances.len() <= 60 + stop_count);
        assert!(intent.utterances.len() >= 20);
    }

    #[test]
    fn test_space_delimited_corpus_joins_with_spaces() {
        let intent = synthesize(TEXTS, "en", 11);
        let multi_word = intent
            .utterances
            .iter()
            .filter(|u| u.word_count() > 1)
            .count();
        assert!(multi_word > 0);
        for utterance in intent.utterances.iter().filter(|u| u.word_count() > 1) {
            assert!(
                utterance.tokens().iter().any(|t| t.is_whitespace),
                "multi-word synthetic utterances should be space-joined: {:?}",
                utterance.text()
            );
        }
    }

    #[test]
    fn test_no_space_corpus_concatenates() {
        let texts = &["こんにちは世界", "さようなら世界", "ありがとう友達"];
        let intent = synthesize(texts, "ja", 11);
        for utterance in &intent.utterances {
            assert!(
                utterance.tokens().iter().all(|t| !t.is_whitespace),
                "no-space corpus must not produce space-joined synthetics: {:?}",
                utterance.text()
            );
        }
    }

    #[test]
    fn test_stop_words_appear_verbatim() {
        let intent = synthesize(TEXTS, "en", 3);
        let texts: Vec<String> = intent.utterances.iter().map(|u| u.text()).collect();
        // The raw stop-word list is appended one word per utterance.
        assert!(texts.contains(&"the".to_string()));
        assert!(texts.contains(&"of".to_string()));
    }

    #[test]
    fn test_empty_corpus_still_synthesizes_from_stop_words() {
        let intent = synthesize(&[], "en", 5);
        // No vocabulary, no junk words; only the stop-word derived texts
        // survive.
        assert!(!intent.utterances.is_empty());
    }
}
