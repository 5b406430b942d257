//! Exact-match index: a literal-text shortcut bypassing classification.
//!
//! Built once at train time from the real (non-synthetic) intents; an
//! incoming utterance whose normalized text matches a training utterance is
//! resolved to that intent directly, at full confidence.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::normalize::exact_match_key;
use crate::analysis::utterance::Utterance;
use crate::classifier::types::Intent;
use crate::error::{Result, SagarisError};

/// Mapping from normalized utterance text to intent name.
///
/// Immutable once built. Two different intents normalizing to the same text
/// are rejected at build time rather than silently tie-broken.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExactMatchIndex {
    entries: BTreeMap<String, String>,
}

impl ExactMatchIndex {
    /// Build the index from the real intent set.
    pub fn build(intents: &[Intent]) -> Result<Self> {
        let mut entries: BTreeMap<String, String> = BTreeMap::new();
        for intent in intents {
            for utterance in &intent.utterances {
                let key = exact_match_key(&utterance.text());
                if key.is_empty() {
                    continue;
                }
                if let Some(existing) = entries.get(&key) {
                    if existing != &intent.name {
                        return Err(SagarisError::validation(format!(
                            "utterance \"{}\" appears in both \"{}\" and \"{}\" after normalization",
                            utterance.text(),
                            existing,
                            intent.name
                        )));
                    }
                    continue;
                }
                entries.insert(key, intent.name.clone());
            }
        }
        Ok(ExactMatchIndex { entries })
    }

    /// Look up an utterance by its normalized text.
    pub fn lookup(&self, utterance: &Utterance) -> Option<&str> {
        let key = exact_match_key(&utterance.text());
        self.entries.get(&key).map(String::as_str)
    }

    /// Number of indexed utterances.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
