//! The numeric optimizer capability behind the point-cloud classifier.
//!
//! [`Optimizer`] is the seam for the host's SVM-like trainer: labeled points
//! in, an opaque serialized blob out, plus a loader producing a
//! [`PredictorHandle`] whose confidences are non-negative and sum to 1.
//!
//! [`LinearOptimizer`] is the default implementation: full-batch multinomial
//! logistic regression with L2 regularization and softmax confidences. It is
//! fully deterministic (zero initialization, fixed iteration order), so two
//! training runs over the same points produce byte-identical blobs.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SagarisError};

/// A labeled feature point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Class label.
    pub label: String,
    /// Feature coordinates.
    pub coordinates: Vec<f64>,
}

impl DataPoint {
    /// Create a new labeled point.
    pub fn new<S: Into<String>>(label: S, coordinates: Vec<f64>) -> Self {
        DataPoint {
            label: label.into(),
            coordinates,
        }
    }
}

/// Options controlling a training run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrainOptions {
    /// Inverse regularization strength. Larger values fit the training data
    /// more tightly.
    pub c: f64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        TrainOptions { c: 1.0 }
    }
}

/// Capability trait for the underlying classifier optimizer.
pub trait Optimizer: Send + Sync {
    /// Fit a model to `points`, reporting progress in `[0, 1]`.
    ///
    /// Returns a serialized model blob. Callers guarantee at least two
    /// distinct labels and finite coordinates.
    fn train(
        &self,
        points: &[DataPoint],
        options: &TrainOptions,
        progress: &(dyn Fn(f64) + Sync),
    ) -> Result<String>;

    /// Load a previously trained blob into a predictor.
    fn load(&self, blob: &str) -> Result<Box<dyn PredictorHandle>>;
}

/// A loaded, immutable predictor.
pub trait PredictorHandle: Send + Sync {
    /// Predict confidences for a feature vector, ranked best first.
    ///
    /// Confidences are non-negative and sum to 1 across labels.
    fn predict(&self, features: &[f64]) -> Result<Vec<(String, f64)>>;

    /// The labels this predictor distinguishes.
    fn labels(&self) -> &[String];
}

const LINEAR_MODEL_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct LinearModel {
    version: u32,
    labels: Vec<String>,
    dims: usize,
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
}

/// Default optimizer: multinomial logistic regression trained by full-batch
/// gradient descent.
#[derive(Clone, Debug)]
pub struct LinearOptimizer {
    epochs: usize,
    learning_rate: f64,
}

impl LinearOptimizer {
    /// Create an optimizer with the default schedule.
    pub fn new() -> Self {
        LinearOptimizer {
            epochs: 150,
            learning_rate: 0.5,
        }
    }

    /// Create an optimizer with a custom schedule.
    pub fn with_schedule(epochs: usize, learning_rate: f64) -> Self {
        LinearOptimizer {
            epochs,
            learning_rate,
        }
    }
}

impl Default for LinearOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Optimizer for LinearOptimizer {
    fn train(
        &self,
        points: &[DataPoint],
        options: &TrainOptions,
        progress: &(dyn Fn(f64) + Sync),
    ) -> Result<String> {
        if points.is_empty() {
            return Err(SagarisError::training("no points to train on"));
        }
        let dims = points[0].coordinates.len();
        if points.iter().any(|p| p.coordinates.len() != dims) {
            return Err(SagarisError::training(
                "points have inconsistent dimensionality",
            ));
        }

        // Labels in first-seen order, for deterministic slot assignment.
        let mut labels: Vec<String> = Vec::new();
        for point in points {
            if !labels.contains(&point.label) {
                labels.push(point.label.clone());
            }
        }
        if labels.len() < 2 {
            return Err(SagarisError::training(
                "need at least two distinct labels",
            ));
        }

        let targets: Vec<usize> = points
            .iter()
            .map(|p| labels.iter().position(|l| l == &p.label).unwrap_or(0))
            .collect();

        let n_classes = labels.len();
        let n_points = points.len() as f64;
        let l2 = 1.0 / (options.c.max(f64::EPSILON) * n_points);

        let mut weights = vec![vec![0.0; dims]; n_classes];
        let mut bias = vec![0.0; n_classes];

        for epoch in 0..self.epochs {
            let mut grad_w = vec![vec![0.0; dims]; n_classes];
            let mut grad_b = vec![0.0; n_classes];

            for (point, &target) in points.iter().zip(targets.iter()) {
                let probs = softmax(&logits(&weights, &bias, &point.coordinates));
                for (class, prob) in probs.iter().enumerate() {
                    let error = prob - if class == target { 1.0 } else { 0.0 };
                    grad_b[class] += error;
                    for (g, x) in grad_w[class].iter_mut().zip(&point.coordinates) {
                        *g += error * x;
                    }
                }
            }

            for class in 0..n_classes {
                bias[class] -= self.learning_rate * grad_b[class] / n_points;
                for (w, g) in weights[class].iter_mut().zip(&grad_w[class]) {
                    *w -= self.learning_rate * (*g / n_points + l2 * *w);
                }
            }

            progress((epoch + 1) as f64 / self.epochs as f64);
        }

        let model = LinearModel {
            version: LINEAR_MODEL_VERSION,
            labels,
            dims,
            weights,
            bias,
        };
        Ok(serde_json::to_string(&model)?)
    }

    fn load(&self, blob: &str) -> Result<Box<dyn PredictorHandle>> {
        let model: LinearModel = serde_json::from_str(blob)
            .map_err(|e| SagarisError::training(format!("invalid linear model blob: {e}")))?;
        if model.version != LINEAR_MODEL_VERSION {
            return Err(SagarisError::training(format!(
                "unsupported linear model version {}",
                model.version
            )));
        }
        if model.weights.len() != model.labels.len()
            || model.bias.len() != model.labels.len()
            || model.weights.iter().any(|w| w.len() != model.dims)
        {
            return Err(SagarisError::training(
                "linear model blob has inconsistent shapes",
            ));
        }
        Ok(Box::new(LinearPredictor { model }))
    }
}

struct LinearPredictor {
    model: LinearModel,
}

impl PredictorHandle for LinearPredictor {
    fn predict(&self, features: &[f64]) -> Result<Vec<(String, f64)>> {
        if features.len() != self.model.dims {
            return Err(SagarisError::training(format!(
                "expected {} features, got {}",
                self.model.dims,
                features.len()
            )));
        }
        let probs = softmax(&logits(&self.model.weights, &self.model.bias, features));
        let mut ranked: Vec<(String, f64)> = self
            .model
            .labels
            .iter()
            .cloned()
            .zip(probs)
            .collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        Ok(ranked)
    }

    fn labels(&self) -> &[String] {
        &self.model.labels
    }
}

fn logits(weights: &[Vec<f64>], bias: &[f64], features: &[f64]) -> Vec<f64> {
    weights
        .iter()
        .zip(bias)
        .map(|(w, b)| w.iter().zip(features).map(|(wi, xi)| wi * xi).sum::<f64>() + b)
        .collect()
}

fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|z| (z - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
