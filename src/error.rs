//! Error types for the Sagaris library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`SagarisError`] enum. Errors that matter to callers carry the identity of
//! the component that produced them: an untrained classifier reports which
//! classifier was asked to predict, and a model-loading failure names the
//! owning classifier plus the first schema violation.
//!
//! # Examples
//!
//! ```
//! use sagaris::error::{Result, SagarisError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SagarisError::validation("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Sagaris operations.
#[derive(Error, Debug)]
pub enum SagarisError {
    /// I/O errors (file operations etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis-related errors (tokenization, normalization)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Training-data validation errors (reserved intent names, exact-match
    /// collisions, empty corpora)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Classifier training errors
    #[error("Training error: {0}")]
    Training(String),

    /// A classifier was asked to predict or serialize before being trained
    /// or loaded
    #[error("{component} was not trained")]
    NotTrained { component: &'static str },

    /// A persisted model failed schema validation on load
    #[error("Could not load model for {component}: {reason}")]
    ModelLoad {
        component: &'static str,
        reason: String,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with SagarisError.
pub type Result<T> = std::result::Result<T, SagarisError>;

impl SagarisError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SagarisError::Analysis(msg.into())
    }

    /// Create a new validation error.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        SagarisError::Validation(msg.into())
    }

    /// Create a new training error.
    pub fn training<S: Into<String>>(msg: S) -> Self {
        SagarisError::Training(msg.into())
    }

    /// Create a new untrained-use error for the given component.
    pub fn not_trained(component: &'static str) -> Self {
        SagarisError::NotTrained { component }
    }

    /// Create a new model-loading error for the given component.
    pub fn model_load<S: Into<String>>(component: &'static str, reason: S) -> Self {
        SagarisError::ModelLoad {
            component,
            reason: reason.into(),
        }
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SagarisError::Other(msg.into())
    }
}
