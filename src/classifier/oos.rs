//! Training of the out-of-scope scorer.
//!
//! A second, independent classifier distinguishing real in-scope utterances
//! from the synthesized none-utterances. Skipped entirely when linguistic
//! prerequisites are missing; scope detection without usable linguistic
//! signal is unreliable, and a missing scorer just means an OOS score of 0.

use std::sync::Arc;

use crate::analysis::Language;
use crate::classifier::featurizer::{Vocabulary, in_scope_features, oos_features};
use crate::classifier::optimizer::{DataPoint, Optimizer, TrainOptions};
use crate::classifier::point_cloud::PointCloudClassifier;
use crate::classifier::progress::ProgressChannel;
use crate::classifier::types::{EntityDefs, Intent};
use crate::error::Result;
use crate::resources::LexicalResources;

/// Component name used in errors for the out-of-scope scorer.
pub const OOS_COMPONENT: &str = "oos scorer";

/// Prefix identifying out-of-scope labels in the scorer's output.
pub const OOS_LABEL_PREFIX: &str = "out";

/// Label assigned to synthetic negative points.
const OOS_LABEL: &str = "out_of_scope";

/// Fixed regularization constant for the scorer. No hyperparameter search.
const OOS_SVM_C: f64 = 5.0;

/// Trains the binary out-of-scope scorer.
pub struct OosTrainer {
    optimizer: Arc<dyn Optimizer>,
}

impl OosTrainer {
    /// Create a trainer over the given optimizer.
    pub fn new(optimizer: Arc<dyn Optimizer>) -> Self {
        OosTrainer { optimizer }
    }

    /// Train and serialize the OOS sub-model.
    ///
    /// Returns `None` without error when training is skipped: part-of-speech
    /// tagging is unavailable for the language, or no synthetic
    /// none-utterances exist. The progress channel is completed either way.
    pub fn train(
        &self,
        intents: &[Intent],
        none_intent: &Intent,
        vocabulary: &Vocabulary,
        entities: &EntityDefs,
        language: &Language,
        resources: &dyn LexicalResources,
        progress: &ProgressChannel,
    ) -> Result<Option<String>> {
        if !resources.is_pos_available(language) || none_intent.utterances.is_empty() {
            progress.complete();
            return Ok(None);
        }

        let entity_names = entities.entity_names();
        let mut points = Vec::new();
        for intent in intents {
            for utterance in &intent.utterances {
                points.push(DataPoint::new(
                    intent.name.clone(),
                    in_scope_features(vocabulary, utterance, &entity_names),
                ));
            }
        }
        for utterance in &none_intent.utterances {
            points.push(DataPoint::new(
                OOS_LABEL,
                oos_features(vocabulary, utterance, &entity_names),
            ));
        }

        let options = TrainOptions { c: OOS_SVM_C };
        let mut classifier = PointCloudClassifier::new(OOS_COMPONENT, Arc::clone(&self.optimizer));
        classifier.train(points, &options, &|p| progress.report(p))?;
        progress.complete();
        Ok(Some(classifier.serialize()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::optimizer::LinearOptimizer;
    use crate::classifier::progress::Progress;
    use crate::classifier::types::NONE_INTENT;
    use crate::analysis::tokenizer::{RegexUtteranceBuilder, UtteranceBuilder};
    use crate::resources::EmbeddedResources;
    use parking_lot::Mutex;

    fn intent(name: &str, texts: &[&str], language: &Language) -> Intent {
        let builder = RegexUtteranceBuilder::new().unwrap();
        let texts: Vec<String> = texts.iter().map(|s| s.to_string()).collect();
        Intent::new(name, builder.build_batch(&texts, language).unwrap())
    }

    fn vocabulary(intents: &[Intent]) -> Vocabulary {
        Vocabulary::from_terms(
            intents
                .iter()
                .flat_map(|i| i.utterances.iter())
                .flat_map(|u| u.lowercase_words().into_iter().map(|w| w.to_string()))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_skip_without_pos_support_completes_progress() {
        let language = Language::new("ja");
        let intents = vec![intent("greet", &["こんにちは世界"], &language)];
        let none = intent(NONE_INTENT, &["のにはを"], &language);

        let last = std::sync::Arc::new(Mutex::new(0.0f64));
        let sink = std::sync::Arc::clone(&last);
        let progress = Progress::new(move |p| *sink.lock() = p);
        let channel = progress.channel(1.0);

        let trainer = OosTrainer::new(Arc::new(LinearOptimizer::new()));
        let result = trainer
            .train(
                &intents,
                &none,
                &vocabulary(&intents),
                &EntityDefs::default(),
                &language,
                &EmbeddedResources::new(),
                &channel,
            )
            .unwrap();
        assert!(result.is_none());
        assert_eq!(*last.lock(), 1.0);
    }

    #[test]
    fn test_skip_without_synthetic_negatives() {
        let language = Language::new("en");
        let intents = vec![intent("greet", &["hello there friend"], &language)];
        let none = Intent::new(NONE_INTENT, vec![]);

        let progress = Progress::new(|_p| {});
        let trainer = OosTrainer::new(Arc::new(LinearOptimizer::new()));
        let result = trainer
            .train(
                &intents,
                &none,
                &vocabulary(&intents),
                &EntityDefs::default(),
                &language,
                &EmbeddedResources::new(),
                &progress.channel(1.0),
            )
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_trained_scorer_separates_junk() {
        let language = Language::new("en");
        let intents = vec![
            intent(
                "greet",
                &["hello there friend", "good morning friend", "hi there buddy"],
                &language,
            ),
            intent(
                "bye",
                &["goodbye dear friend", "see you later", "bye bye now"],
                &language,
            ),
        ];
        let none = intent(
            NONE_INTENT,
            &["qwz vrb nlx", "mxs trq wvb", "plo ikj uhy"],
            &language,
        );
        let vocab = vocabulary(&intents);

        let progress = Progress::new(|_p| {});
        let trainer = OosTrainer::new(Arc::new(LinearOptimizer::new()));
        let blob = trainer
            .train(
                &intents,
                &none,
                &vocab,
                &EntityDefs::default(),
                &language,
                &EmbeddedResources::new(),
                &progress.channel(1.0),
            )
            .unwrap()
            .expect("scorer should be trained for English");

        let optimizer: Arc<dyn Optimizer> = Arc::new(LinearOptimizer::new());
        let scorer = PointCloudClassifier::load(OOS_COMPONENT, optimizer, &blob).unwrap();

        let builder = RegexUtteranceBuilder::new().unwrap();
        let junk_probe = builder
            .build_batch(&["zzq wvx plk".to_string()], &language)
            .unwrap()
            .remove(0);
        let ranked = scorer
            .predict(&oos_features(&vocab, &junk_probe, &[]))
            .unwrap();
        let oos_score: f64 = ranked
            .iter()
            .filter(|(label, _)| label.starts_with(OOS_LABEL_PREFIX))
            .map(|(_, c)| *c)
            .fold(0.0, f64::max);
        assert!(oos_score > 0.5, "junk probe should score out of scope");
    }
}
