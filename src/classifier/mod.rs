//! Open-vocabulary intent classification with out-of-scope estimation.
//!
//! The pipeline, leaves first: the [`point_cloud`] classifier wraps the
//! numeric [`optimizer`] capability; [`none_synth`] manufactures the
//! negative class; [`in_scope`] and [`oos`] train the two statistical
//! sub-models; [`exact`] indexes verbatim training utterances; and
//! [`orchestrator`] drives training, persistence, and prediction-time
//! fusion.

pub mod exact;
pub mod featurizer;
pub mod in_scope;
pub mod model;
pub mod none_synth;
pub mod oos;
pub mod optimizer;
pub mod orchestrator;
pub mod point_cloud;
pub mod progress;
pub mod types;

pub use exact::ExactMatchIndex;
pub use model::{Model, ModelMetadata};
pub use orchestrator::OosAwareClassifier;
pub use types::{EntityDefs, Intent, IntentPrediction, NONE_INTENT, PredictOutput, TrainInput};
