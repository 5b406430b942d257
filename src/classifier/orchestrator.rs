//! The out-of-scope-aware intent classifier.
//!
//! Top-level component of the pipeline: drives none-intent synthesis, trains
//! the in-scope classifier and the out-of-scope scorer in parallel, builds
//! the exact-match index, and fuses the three signals at prediction time.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;

use crate::analysis::tokenizer::{RegexUtteranceBuilder, UtteranceBuilder};
use crate::analysis::utterance::Utterance;
use crate::classifier::exact::ExactMatchIndex;
use crate::classifier::featurizer::{Vocabulary, in_scope_features, oos_features};
use crate::classifier::in_scope::{IN_SCOPE_COMPONENT, InScopeTrainer};
use crate::classifier::model::{MODEL_SCHEMA_VERSION, Model, ModelMetadata};
use crate::classifier::none_synth::NoneIntentSynthesizer;
use crate::classifier::oos::{OOS_COMPONENT, OOS_LABEL_PREFIX, OosTrainer};
use crate::classifier::optimizer::{LinearOptimizer, Optimizer};
use crate::classifier::point_cloud::PointCloudClassifier;
use crate::classifier::progress::Progress;
use crate::classifier::types::{IntentPrediction, PredictOutput, TrainInput};
use crate::error::{Result, SagarisError};
use crate::resources::rng::SeededRng;
use crate::resources::{
    CharSampleJunkGenerator, EmbeddedResources, JunkWordGenerator, LexicalResources,
};

/// Component name for orchestrator-level errors.
const COMPONENT: &str = "oos-aware intent classifier";

/// Runtime predictor handles derived from a persisted [`Model`].
///
/// Built lazily on first prediction after a load, or immediately after
/// training; never partially rebuilt.
struct Predictors {
    in_scope: PointCloudClassifier,
    oos: Option<PointCloudClassifier>,
    vocabulary: Vocabulary,
    exact: ExactMatchIndex,
    entity_names: Vec<String>,
}

/// Open-vocabulary intent classifier with out-of-scope estimation.
///
/// State is an explicit progression: untrained (no model), trained or loaded
/// (model present), with predictors materialized lazily from the model.
pub struct OosAwareClassifier {
    optimizer: Arc<dyn Optimizer>,
    resources: Arc<dyn LexicalResources>,
    junk: Arc<dyn JunkWordGenerator>,
    builder: Arc<dyn UtteranceBuilder>,
    model: Option<Model>,
    // Rebuilding under a racing first prediction would produce an equivalent
    // value, so the lock is for convenience, not correctness.
    predictors: Mutex<Option<Arc<Predictors>>>,
}

impl OosAwareClassifier {
    /// Create an untrained classifier over explicit capabilities.
    pub fn new(
        optimizer: Arc<dyn Optimizer>,
        resources: Arc<dyn LexicalResources>,
        junk: Arc<dyn JunkWordGenerator>,
        builder: Arc<dyn UtteranceBuilder>,
    ) -> Self {
        OosAwareClassifier {
            optimizer,
            resources,
            junk,
            builder,
            model: None,
            predictors: Mutex::new(None),
        }
    }

    /// Create an untrained classifier with the built-in capability stack.
    pub fn with_defaults() -> Self {
        OosAwareClassifier::new(
            Arc::new(LinearOptimizer::new()),
            Arc::new(EmbeddedResources::new()),
            Arc::new(CharSampleJunkGenerator::new()),
            Arc::new(RegexUtteranceBuilder::default()),
        )
    }

    /// Whether a model is present (trained or loaded).
    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// The current model, if any.
    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    /// Train the classifier.
    ///
    /// `progress` receives a monotonically non-decreasing combined fraction
    /// that reaches exactly 1.0 once both sub-trainers finish, including
    /// when one of them short-circuits.
    pub fn train<F>(&mut self, input: &TrainInput, progress: F) -> Result<()>
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        input.validate()?;
        // Building the index up front also rejects cross-intent collisions
        // before any training cost is paid.
        let exact = ExactMatchIndex::build(&input.intents)?;

        let mut rng = SeededRng::from_seed(input.seed);
        let all_utterances = input.all_utterances();

        let synthesizer =
            NoneIntentSynthesizer::new(&*self.resources, &*self.junk, &*self.builder);
        let none_intent = synthesizer.synthesize(&all_utterances, &input.language, &mut rng)?;

        // First-seen corpus order, duplicates preserved.
        let vocabulary_terms: Vec<String> = all_utterances
            .iter()
            .flat_map(|u| u.tokens())
            .map(|t| t.lower.clone())
            .collect();
        let vocabulary = Vocabulary::from_terms(&vocabulary_terms);

        let progress = Progress::new(progress);
        let in_scope_channel = progress.channel(0.5);
        let oos_channel = progress.channel(0.5);
        let mut in_scope_rng = rng.fork();

        let in_scope_trainer = InScopeTrainer::new(Arc::clone(&self.optimizer));
        let oos_trainer = OosTrainer::new(Arc::clone(&self.optimizer));

        let (in_scope_result, oos_result) = rayon::join(
            || {
                in_scope_trainer.train(
                    &input.intents,
                    &none_intent,
                    &vocabulary,
                    &input.entities,
                    &mut in_scope_rng,
                    &in_scope_channel,
                )
            },
            || {
                oos_trainer.train(
                    &input.intents,
                    &none_intent,
                    &vocabulary,
                    &input.entities,
                    &input.language,
                    &*self.resources,
                    &oos_channel,
                )
            },
        );
        let in_scope_model = in_scope_result?;
        let oos_model = oos_result?;

        let model = Model {
            version: MODEL_SCHEMA_VERSION,
            language: input.language.clone(),
            vocabulary: vocabulary_terms,
            in_scope_model,
            oos_model,
            exact_match_index: exact,
            entities: input.entities.clone(),
            metadata: ModelMetadata {
                trained_at: Utc::now(),
                seed: input.seed,
                intent_count: input.intents.len(),
            },
        };

        let predictors = self.build_predictors(&model)?;
        *self.predictors.lock() = Some(Arc::new(predictors));
        self.model = Some(model);
        Ok(())
    }

    /// Predict the intent of an utterance.
    ///
    /// Returns the ranked intents (exact matches promoted to the front at
    /// confidence 1.0, without renormalizing the rest) and an independent
    /// out-of-scope score. The in-scope "none" entry and the `oos` score are
    /// deliberately not reconciled; their sum is not guaranteed to be 1.
    pub fn predict(&self, utterance: &Utterance) -> Result<PredictOutput> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| SagarisError::not_trained(COMPONENT))?;
        let predictors = self.predictors_for(model)?;

        let features = in_scope_features(&predictors.vocabulary, utterance, &predictors.entity_names);
        let mut intents: Vec<IntentPrediction> = predictors
            .in_scope
            .predict(&features)?
            .into_iter()
            .map(|(intent, confidence)| IntentPrediction { intent, confidence })
            .collect();

        if let Some(matched) = predictors.exact.lookup(utterance) {
            let matched = matched.to_string();
            intents.retain(|entry| entry.intent != matched);
            intents.insert(
                0,
                IntentPrediction {
                    intent: matched,
                    confidence: 1.0,
                },
            );
        }

        let oos = match &predictors.oos {
            Some(scorer) => {
                let features =
                    oos_features(&predictors.vocabulary, utterance, &predictors.entity_names);
                // Scorer failures degrade to 0, they never surface.
                match scorer.predict(&features) {
                    Ok(ranked) => ranked
                        .iter()
                        .filter(|(label, _)| label.starts_with(OOS_LABEL_PREFIX))
                        .map(|(_, confidence)| *confidence)
                        .fold(0.0, f64::max),
                    Err(_) => 0.0,
                }
            }
            None => 0.0,
        };

        Ok(PredictOutput { intents, oos })
    }

    /// Serialize the trained model.
    pub fn serialize(&self) -> Result<String> {
        match &self.model {
            Some(model) => model.to_json(),
            None => Err(SagarisError::not_trained(COMPONENT)),
        }
    }

    /// Load a previously serialized model, replacing any current one.
    ///
    /// Predictors are rebuilt lazily on the next prediction.
    pub fn load(&mut self, json: &str) -> Result<()> {
        let model = Model::from_json(COMPONENT, json)?;
        *self.predictors.lock() = None;
        self.model = Some(model);
        Ok(())
    }

    fn predictors_for(&self, model: &Model) -> Result<Arc<Predictors>> {
        let mut guard = self.predictors.lock();
        if let Some(predictors) = guard.as_ref() {
            return Ok(Arc::clone(predictors));
        }
        let predictors = Arc::new(self.build_predictors(model)?);
        *guard = Some(Arc::clone(&predictors));
        Ok(predictors)
    }

    fn build_predictors(&self, model: &Model) -> Result<Predictors> {
        let in_scope = PointCloudClassifier::load(
            IN_SCOPE_COMPONENT,
            Arc::clone(&self.optimizer),
            &model.in_scope_model,
        )?;
        let oos = match &model.oos_model {
            Some(blob) => Some(PointCloudClassifier::load(
                OOS_COMPONENT,
                Arc::clone(&self.optimizer),
                blob,
            )?),
            None => None,
        };
        Ok(Predictors {
            in_scope,
            oos,
            vocabulary: model.vocabulary_index(),
            exact: model.exact_match_index.clone(),
            entity_names: model.entities.entity_names(),
        })
    }
}
