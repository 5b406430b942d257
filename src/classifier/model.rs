//! Persisted model record and its runtime counterpart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::Language;
use crate::classifier::exact::ExactMatchIndex;
use crate::classifier::featurizer::Vocabulary;
use crate::classifier::types::EntityDefs;
use crate::error::{Result, SagarisError};

/// Schema version of the persisted model record.
pub const MODEL_SCHEMA_VERSION: u32 = 1;

/// Metadata recorded with every trained model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Training timestamp.
    pub trained_at: DateTime<Utc>,
    /// Training seed used for this run.
    pub seed: u64,
    /// Number of real intents the model was trained on.
    pub intent_count: usize,
}

/// The persisted form of a trained classifier.
///
/// Immutable once written. A classifier either holds a complete `Model` or
/// none at all; partially populated models are not representable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Schema version, checked on load.
    pub version: u32,
    /// Training language.
    pub language: Language,
    /// Lowercase tokens of all training utterances, corpus order preserved,
    /// duplicates allowed.
    pub vocabulary: Vec<String>,
    /// Serialized in-scope sub-model.
    pub in_scope_model: String,
    /// Serialized OOS sub-model; absent when OOS training was skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oos_model: Option<String>,
    /// Exact-match index over the real intents.
    pub exact_match_index: ExactMatchIndex,
    /// Entity definitions, needed to rebuild feature layouts at predict time.
    pub entities: EntityDefs,
    /// Training metadata.
    pub metadata: ModelMetadata,
}

impl Model {
    /// Serialize the model to its canonical JSON form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and validate a persisted model.
    ///
    /// `component` names the owning classifier in the error on mismatch.
    pub fn from_json(component: &'static str, json: &str) -> Result<Self> {
        let model: Model = serde_json::from_str(json)
            .map_err(|e| SagarisError::model_load(component, e.to_string()))?;
        if model.version != MODEL_SCHEMA_VERSION {
            return Err(SagarisError::model_load(
                component,
                format!(
                    "unsupported schema version {} (expected {})",
                    model.version, MODEL_SCHEMA_VERSION
                ),
            ));
        }
        Ok(model)
    }

    /// Build the vocabulary index over the persisted term list.
    pub fn vocabulary_index(&self) -> Vocabulary {
        Vocabulary::from_terms(&self.vocabulary)
    }
}
