//! # Sagaris
//!
//! An out-of-scope aware intent classification library for Rust.
//!
//! Sagaris assigns free-text utterances to a finite set of user-defined
//! intents and estimates whether an utterance falls outside all of them,
//! without ever being shown an out-of-scope example: the negative class is
//! synthesized from the training corpus itself.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - Synthetic "none" intent built from corpus vocabulary, stop words, and
//!   generated junk tokens
//! - Independent in-scope and out-of-scope classifiers trained in parallel
//! - Deterministic training given a fixed seed
//! - Exact-match override for verbatim training utterances
//! - Versioned, JSON-serializable models
//!
//! ## Example
//!
//! ```no_run
//! use sagaris::analysis::Language;
//! use sagaris::analysis::tokenizer::{RegexUtteranceBuilder, UtteranceBuilder};
//! use sagaris::classifier::orchestrator::OosAwareClassifier;
//! use sagaris::classifier::types::{EntityDefs, Intent, TrainInput};
//!
//! let language = Language::new("en");
//! let builder = RegexUtteranceBuilder::new().unwrap();
//! let greet = Intent::new(
//!     "greet",
//!     builder
//!         .build_batch(
//!             &["hello there".into(), "hi friend".into(), "good morning".into()],
//!             &language,
//!         )
//!         .unwrap(),
//! );
//!
//! let input = TrainInput::new(language, vec![greet], 42, EntityDefs::default());
//! let mut classifier = OosAwareClassifier::with_defaults();
//! classifier.train(&input, |_p| {}).unwrap();
//! ```

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod error;
pub mod resources;

pub mod prelude {
    pub use crate::analysis::Language;
    pub use crate::analysis::tokenizer::{RegexUtteranceBuilder, UtteranceBuilder};
    pub use crate::analysis::utterance::Utterance;
    pub use crate::classifier::orchestrator::OosAwareClassifier;
    pub use crate::classifier::types::{EntityDefs, Intent, PredictOutput, TrainInput};
    pub use crate::error::{Result, SagarisError};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
