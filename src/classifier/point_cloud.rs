//! Generic point-cloud classifier.
//!
//! Wraps the [`Optimizer`] capability with the bookkeeping every trainer in
//! the pipeline needs: non-finite coordinate filtering, a degenerate mode
//! when fewer than two distinct labels survive filtering, a versioned
//! serialized form, and typed untrained-use / model-loading errors that name
//! the owning component.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::classifier::optimizer::{DataPoint, Optimizer, PredictorHandle, TrainOptions};
use crate::error::{Result, SagarisError};

/// Schema version of the serialized point-cloud model.
pub const POINT_CLOUD_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum PointCloudModel {
    /// Fewer than two labels survived training; only the label list is kept.
    Degenerate { labels: Vec<String> },
    /// A fitted optimizer blob.
    Fitted { blob: String },
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializedPointCloud {
    version: u32,
    model: PointCloudModel,
}

enum PredictorKind {
    Degenerate(Vec<String>),
    Fitted(Box<dyn PredictorHandle>),
}

struct LoadedState {
    serialized: String,
    predictor: PredictorKind,
}

/// A multiclass/binary classifier over labeled feature vectors.
pub struct PointCloudClassifier {
    component: &'static str,
    optimizer: Arc<dyn Optimizer>,
    state: Option<LoadedState>,
}

impl PointCloudClassifier {
    /// Create an untrained classifier owned by `component`.
    ///
    /// The component name appears in untrained-use and model-loading errors.
    pub fn new(component: &'static str, optimizer: Arc<dyn Optimizer>) -> Self {
        PointCloudClassifier {
            component,
            optimizer,
            state: None,
        }
    }

    /// Train on labeled points.
    ///
    /// Points with any non-finite coordinate are dropped. If fewer than two
    /// distinct labels remain, training is skipped: the classifier remembers
    /// only the label list, reports full progress immediately, and predicts
    /// the single remembered label at confidence 1.0 (or nothing at all).
    pub fn train(
        &mut self,
        points: Vec<DataPoint>,
        options: &TrainOptions,
        progress: &(dyn Fn(f64) + Sync),
    ) -> Result<()> {
        let points: Vec<DataPoint> = points
            .into_iter()
            .filter(|p| p.coordinates.iter().all(|c| c.is_finite()))
            .collect();

        let mut labels: Vec<String> = Vec::new();
        for point in &points {
            if !labels.contains(&point.label) {
                labels.push(point.label.clone());
            }
        }

        let model = if labels.len() < 2 {
            progress(1.0);
            PointCloudModel::Degenerate { labels }
        } else {
            let blob = self.optimizer.train(&points, options, progress)?;
            PointCloudModel::Fitted { blob }
        };

        let wrapper = SerializedPointCloud {
            version: POINT_CLOUD_VERSION,
            model,
        };
        let serialized = serde_json::to_string(&wrapper)?;
        let predictor = self.materialize(wrapper.model)?;
        self.state = Some(LoadedState {
            serialized,
            predictor,
        });
        Ok(())
    }

    /// Serialize the trained model.
    pub fn serialize(&self) -> Result<String> {
        match &self.state {
            Some(state) => Ok(state.serialized.clone()),
            None => Err(SagarisError::not_trained(self.component)),
        }
    }

    /// Load a serialized model, validating it against the versioned schema.
    pub fn load(
        component: &'static str,
        optimizer: Arc<dyn Optimizer>,
        serialized: &str,
    ) -> Result<Self> {
        let parsed: SerializedPointCloud = serde_json::from_str(serialized)
            .map_err(|e| SagarisError::model_load(component, e.to_string()))?;
        if parsed.version != POINT_CLOUD_VERSION {
            return Err(SagarisError::model_load(
                component,
                format!(
                    "unsupported schema version {} (expected {})",
                    parsed.version, POINT_CLOUD_VERSION
                ),
            ));
        }

        let mut classifier = PointCloudClassifier::new(component, optimizer);
        let predictor = classifier
            .materialize(parsed.model)
            .map_err(|e| SagarisError::model_load(component, e.to_string()))?;
        classifier.state = Some(LoadedState {
            serialized: serialized.to_string(),
            predictor,
        });
        Ok(classifier)
    }

    /// Predict ranked `(label, confidence)` pairs for a feature vector.
    pub fn predict(&self, features: &[f64]) -> Result<Vec<(String, f64)>> {
        match &self.state {
            None => Err(SagarisError::not_trained(self.component)),
            Some(state) => match &state.predictor {
                PredictorKind::Degenerate(labels) => Ok(labels
                    .first()
                    .map(|label| vec![(label.clone(), 1.0)])
                    .unwrap_or_default()),
                PredictorKind::Fitted(handle) => handle.predict(features),
            },
        }
    }

    /// Whether this classifier holds a trained or loaded model.
    pub fn is_trained(&self) -> bool {
        self.state.is_some()
    }

    fn materialize(&mut self, model: PointCloudModel) -> Result<PredictorKind> {
        match model {
            PointCloudModel::Degenerate { labels } => Ok(PredictorKind::Degenerate(labels)),
            PointCloudModel::Fitted { blob } => {
                Ok(PredictorKind::Fitted(self.optimizer.load(&blob)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::optimizer::LinearOptimizer;

    fn optimizer() -> Arc<dyn Optimizer> {
        Arc::new(LinearOptimizer::new())
    }

    fn separable_points() -> Vec<DataPoint> {
        vec![
            DataPoint::new("yes", vec![1.0, 0.0]),
            DataPoint::new("yes", vec![0.8, 0.1]),
            DataPoint::new("no", vec![0.0, 1.0]),
            DataPoint::new("no", vec![0.1, 0.9]),
        ]
    }

    #[test]
    fn test_untrained_use_fails() {
        let classifier = PointCloudClassifier::new("test classifier", optimizer());
        assert!(matches!(
            classifier.predict(&[0.0]),
            Err(SagarisError::NotTrained { component: "test classifier" })
        ));
        assert!(classifier.serialize().is_err());
    }

    #[test]
    fn test_single_label_degenerate_mode() {
        let mut classifier = PointCloudClassifier::new("test classifier", optimizer());
        let points = vec![
            DataPoint::new("only", vec![1.0]),
            DataPoint::new("only", vec![2.0]),
        ];
        let reported = parking_lot::Mutex::new(0.0f64);
        classifier
            .train(points, &TrainOptions::default(), &|p| *reported.lock() = p)
            .unwrap();
        assert_eq!(*reported.lock(), 1.0);

        let ranked = classifier.predict(&[123.0]).unwrap();
        assert_eq!(ranked, vec![("only".to_string(), 1.0)]);
    }

    #[test]
    fn test_zero_points_predicts_nothing() {
        let mut classifier = PointCloudClassifier::new("test classifier", optimizer());
        classifier
            .train(Vec::new(), &TrainOptions::default(), &|_p| {})
            .unwrap();
        assert!(classifier.predict(&[1.0]).unwrap().is_empty());
    }

    #[test]
    fn test_nan_points_are_dropped() {
        let mut classifier = PointCloudClassifier::new("test classifier", optimizer());
        let mut points = separable_points();
        // Poison the "no" class so only "yes" survives.
        for point in points.iter_mut().filter(|p| p.label == "no") {
            point.coordinates[0] = f64::NAN;
        }
        classifier
            .train(points, &TrainOptions::default(), &|_p| {})
            .unwrap();
        let ranked = classifier.predict(&[0.0, 1.0]).unwrap();
        assert_eq!(ranked, vec![("yes".to_string(), 1.0)]);
    }

    #[test]
    fn test_serialize_load_round_trip() {
        let mut classifier = PointCloudClassifier::new("test classifier", optimizer());
        classifier
            .train(separable_points(), &TrainOptions::default(), &|_p| {})
            .unwrap();
        let probe = vec![0.9, 0.05];
        let before = classifier.predict(&probe).unwrap();

        let serialized = classifier.serialize().unwrap();
        let loaded =
            PointCloudClassifier::load("test classifier", optimizer(), &serialized).unwrap();
        let after = loaded.predict(&probe).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_degenerate_round_trip() {
        let mut classifier = PointCloudClassifier::new("test classifier", optimizer());
        classifier
            .train(
                vec![DataPoint::new("only", vec![1.0])],
                &TrainOptions::default(),
                &|_p| {},
            )
            .unwrap();
        let serialized = classifier.serialize().unwrap();
        let loaded =
            PointCloudClassifier::load("test classifier", optimizer(), &serialized).unwrap();
        assert_eq!(
            loaded.predict(&[0.0]).unwrap(),
            vec![("only".to_string(), 1.0)]
        );
    }

    #[test]
    fn test_malformed_load_names_component() {
        let error = PointCloudClassifier::load("oos scorer", optimizer(), "{}")
            .err()
            .expect("malformed blob should fail to load");
        match error {
            SagarisError::ModelLoad { component, .. } => assert_eq!(component, "oos scorer"),
            other => panic!("expected ModelLoad error, got {other:?}"),
        }
    }
}
