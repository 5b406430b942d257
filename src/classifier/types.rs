//! Core data types of the intent classification pipeline.

use serde::{Deserialize, Serialize};

use crate::analysis::Language;
use crate::analysis::utterance::Utterance;
use crate::error::{Result, SagarisError};

/// Reserved name of the synthetic negative class.
///
/// No caller-supplied intent may use this name; the synthesizer owns it.
pub const NONE_INTENT: &str = "none";

/// A named category of utterances the classifier must distinguish.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// Intent name, unique within a training set.
    pub name: String,
    /// Ordered training utterances for this intent.
    pub utterances: Vec<Utterance>,
    /// Conversational contexts this intent belongs to.
    pub contexts: Vec<String>,
    /// Slot names defined on this intent. Not consumed by the classifier,
    /// carried for hosts that do slot filling downstream.
    pub slot_names: Vec<String>,
}

impl Intent {
    /// Create a new intent with no contexts or slots.
    pub fn new<S: Into<String>>(name: S, utterances: Vec<Utterance>) -> Self {
        Intent {
            name: name.into(),
            utterances,
            contexts: Vec::new(),
            slot_names: Vec::new(),
        }
    }

    /// Set the contexts for this intent.
    pub fn with_contexts(mut self, contexts: Vec<String>) -> Self {
        self.contexts = contexts;
        self
    }
}

/// Entity definitions used to enrich feature vectors.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityDefs {
    /// Names of list entities.
    pub list_entities: Vec<String>,
    /// Names of pattern entities.
    pub pattern_entities: Vec<String>,
}

impl EntityDefs {
    /// All entity names: list entities followed by pattern entities.
    pub fn entity_names(&self) -> Vec<String> {
        self.list_entities
            .iter()
            .chain(self.pattern_entities.iter())
            .cloned()
            .collect()
    }
}

/// Everything a training run needs.
#[derive(Clone, Debug)]
pub struct TrainInput {
    /// Language of the training corpus.
    pub language: Language,
    /// The full intent set.
    pub intents: Vec<Intent>,
    /// Training seed; fixing it makes training fully reproducible.
    pub seed: u64,
    /// Entity definitions used to enrich feature vectors.
    pub entities: EntityDefs,
}

impl TrainInput {
    /// Create a new training input.
    pub fn new(language: Language, intents: Vec<Intent>, seed: u64, entities: EntityDefs) -> Self {
        TrainInput {
            language,
            intents,
            seed,
            entities,
        }
    }

    /// Flattened view of all training utterances across all intents.
    pub fn all_utterances(&self) -> Vec<&Utterance> {
        self.intents
            .iter()
            .flat_map(|intent| intent.utterances.iter())
            .collect()
    }

    /// Validate the intent set: non-empty, unique names, none reserved.
    pub fn validate(&self) -> Result<()> {
        if self.intents.is_empty() {
            return Err(SagarisError::validation("training input has no intents"));
        }
        let mut seen: Vec<&str> = Vec::new();
        for intent in &self.intents {
            if intent.name == NONE_INTENT {
                return Err(SagarisError::validation(format!(
                    "intent name \"{NONE_INTENT}\" is reserved for the synthetic negative class"
                )));
            }
            if seen.contains(&intent.name.as_str()) {
                return Err(SagarisError::validation(format!(
                    "duplicate intent name \"{}\"",
                    intent.name
                )));
            }
            seen.push(&intent.name);
        }
        Ok(())
    }
}

/// One ranked prediction entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntentPrediction {
    /// Intent name.
    pub intent: String,
    /// Confidence assigned by the in-scope classifier, or 1.0 after an
    /// exact-match override.
    pub confidence: f64,
}

/// Output of a prediction.
///
/// `oos` is an independent signal: it is not reconciled with the in-scope
/// ranking and the two are not guaranteed to sum to 1.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictOutput {
    /// Ranked intents, best first.
    pub intents: Vec<IntentPrediction>,
    /// Out-of-scope score in `[0, 1]`; 0 when no OOS sub-model exists.
    pub oos: f64,
}
