//! Training of the in-scope intent classifier.
//!
//! Wraps the point-cloud classifier to train one multiclass model over the
//! real intents plus a sampled subset of the synthesized none-utterances.

use std::sync::Arc;

use crate::classifier::featurizer::{Vocabulary, in_scope_features, intent_features};
use crate::classifier::optimizer::{DataPoint, Optimizer, TrainOptions};
use crate::classifier::point_cloud::PointCloudClassifier;
use crate::classifier::progress::ProgressChannel;
use crate::classifier::types::{EntityDefs, Intent, NONE_INTENT};
use crate::error::Result;
use crate::resources::rng::SeededRng;

/// Component name used in errors for the in-scope classifier.
pub const IN_SCOPE_COMPONENT: &str = "intent classifier";

/// Minimum utterance count for an intent to enter the trainable set.
///
/// Intents below this threshold are excluded from the statistical classifier
/// but remain matchable through the exact-match index.
pub const MIN_NB_UTTERANCES: usize = 3;

/// Minimum word tokens a synthetic none-utterance needs to be usable.
const MIN_NONE_WORDS: usize = 3;

/// Size of the sampled none class relative to the mean intent size.
const NONE_CLASS_RATIO: f64 = 2.5;

/// Trains the multiclass in-scope classifier.
pub struct InScopeTrainer {
    optimizer: Arc<dyn Optimizer>,
}

impl InScopeTrainer {
    /// Create a trainer over the given optimizer.
    pub fn new(optimizer: Arc<dyn Optimizer>) -> Self {
        InScopeTrainer { optimizer }
    }

    /// Train and serialize the in-scope sub-model.
    pub fn train(
        &self,
        intents: &[Intent],
        none_intent: &Intent,
        vocabulary: &Vocabulary,
        entities: &EntityDefs,
        rng: &mut SeededRng,
        progress: &ProgressChannel,
    ) -> Result<String> {
        // Degenerate or too-short synthetic examples would pollute the
        // negative class.
        let mut usable_none: Vec<&_> = none_intent
            .utterances
            .iter()
            .filter(|u| u.word_count() >= MIN_NONE_WORDS)
            .collect();

        let trainable: Vec<&Intent> = intents
            .iter()
            .filter(|intent| intent.utterances.len() >= MIN_NB_UTTERANCES)
            .collect();

        let n_avg_utts = if trainable.is_empty() {
            0
        } else {
            let total: usize = trainable.iter().map(|i| i.utterances.len()).sum();
            (total as f64 / trainable.len() as f64).ceil() as usize
        };

        rng.shuffle(&mut usable_none);
        let none_take = usable_none
            .len()
            .min((n_avg_utts as f64 * NONE_CLASS_RATIO).round() as usize);

        let none_class = Intent {
            name: NONE_INTENT.to_string(),
            utterances: usable_none[..none_take].iter().map(|u| (*u).clone()).collect(),
            contexts: intents
                .first()
                .map(|intent| intent.contexts.clone())
                .unwrap_or_default(),
            slot_names: Vec::new(),
        };

        let entity_names = entities.entity_names();
        let mut points = Vec::new();
        for intent in trainable.iter().copied().chain(std::iter::once(&none_class)) {
            for utterance in &intent.utterances {
                points.push(DataPoint::new(
                    intent.name.clone(),
                    in_scope_features(vocabulary, utterance, &entity_names),
                ));
            }
            // Prototype point anchoring the intent's region.
            if let Some(centroid) = intent_features(vocabulary, intent, &entity_names) {
                points.push(DataPoint::new(intent.name.clone(), centroid));
            }
        }

        let mut classifier = PointCloudClassifier::new(IN_SCOPE_COMPONENT, Arc::clone(&self.optimizer));
        classifier.train(points, &TrainOptions::default(), &|p| progress.report(p))?;
        progress.complete();
        classifier.serialize()
    }
}
