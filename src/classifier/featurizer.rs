//! Feature extraction over a fixed vocabulary.
//!
//! All featurizers map an utterance into a numeric vector whose layout is
//! `[one slot per distinct vocabulary term, one slot per entity name, one
//! out-of-vocabulary ratio slot]`. The in-scope and out-of-scope featurizers
//! share this layout so their points live in the same space; they differ in
//! how vocabulary slots are filled.

use ahash::AHashMap;

use crate::analysis::utterance::Utterance;
use crate::classifier::types::Intent;

/// An ordered vocabulary with first-seen term indexing.
///
/// The persisted form keeps every term occurrence in corpus order
/// (duplicates allowed); the index maps each distinct lowercase term to its
/// first position-of-appearance rank.
#[derive(Clone, Debug)]
pub struct Vocabulary {
    distinct: Vec<String>,
    index: AHashMap<String, usize>,
}

impl Vocabulary {
    /// Build a vocabulary from an ordered term list, duplicates allowed.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut distinct = Vec::new();
        let mut index = AHashMap::new();
        for term in terms {
            let term = term.as_ref();
            if !index.contains_key(term) {
                index.insert(term.to_string(), distinct.len());
                distinct.push(term.to_string());
            }
        }
        Vocabulary { distinct, index }
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.distinct.len()
    }

    /// Check whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.distinct.is_empty()
    }

    /// Slot index of a lowercase term, if known.
    pub fn position(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// The distinct terms in first-seen order.
    pub fn terms(&self) -> &[String] {
        &self.distinct
    }
}

/// Feature-vector dimensionality for a vocabulary and entity set.
pub fn feature_dims(vocabulary: &Vocabulary, entity_names: &[String]) -> usize {
    vocabulary.len() + entity_names.len() + 1
}

/// Generic utterance features: normalized vocabulary counts, entity-name
/// indicators, and the out-of-vocabulary ratio.
pub fn utterance_features(
    vocabulary: &Vocabulary,
    utterance: &Utterance,
    entity_names: &[String],
) -> Vec<f64> {
    let mut features = vec![0.0; feature_dims(vocabulary, entity_names)];
    let words = utterance.lowercase_words();
    let word_count = words.len() as f64;

    let mut oov = 0usize;
    for word in &words {
        match vocabulary.position(word) {
            Some(slot) => features[slot] += 1.0,
            None => oov += 1,
        }
    }
    if word_count > 0.0 {
        for slot in features.iter_mut().take(vocabulary.len()) {
            *slot /= word_count;
        }
    }

    let text = utterance.text().to_lowercase();
    for (offset, entity) in entity_names.iter().enumerate() {
        if !entity.is_empty() && text.contains(&entity.to_lowercase()) {
            features[vocabulary.len() + offset] = 1.0;
        }
    }

    if word_count > 0.0 {
        features[vocabulary.len() + entity_names.len()] = oov as f64 / word_count;
    }

    features
}

/// Featurize an utterance for the in-scope classifier.
pub fn in_scope_features(
    vocabulary: &Vocabulary,
    utterance: &Utterance,
    entity_names: &[String],
) -> Vec<f64> {
    utterance_features(vocabulary, utterance, entity_names)
}

/// Featurize an utterance for the out-of-scope scorer.
///
/// Vocabulary slots are binary presence rather than normalized counts: what
/// matters for scope detection is which words are known at all, not their
/// relative frequency.
pub fn oos_features(
    vocabulary: &Vocabulary,
    utterance: &Utterance,
    entity_names: &[String],
) -> Vec<f64> {
    let mut features = utterance_features(vocabulary, utterance, entity_names);
    for slot in features.iter_mut().take(vocabulary.len()) {
        if *slot > 0.0 {
            *slot = 1.0;
        }
    }
    features
}

/// Mean in-scope feature vector of an intent's utterances.
///
/// Serves as a prototype point anchoring the intent's region in feature
/// space; returns `None` for an intent with no utterances.
pub fn intent_features(
    vocabulary: &Vocabulary,
    intent: &Intent,
    entity_names: &[String],
) -> Option<Vec<f64>> {
    if intent.utterances.is_empty() {
        return None;
    }
    let dims = feature_dims(vocabulary, entity_names);
    let mut mean = vec![0.0; dims];
    for utterance in &intent.utterances {
        let features = in_scope_features(vocabulary, utterance, entity_names);
        for (slot, value) in mean.iter_mut().zip(features) {
            *slot += value;
        }
    }
    let n = intent.utterances.len() as f64;
    for slot in &mut mean {
        *slot /= n;
    }
    Some(mean)
}
