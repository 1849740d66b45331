//! Dropout risk classifier
//!
//! A logistic binary classifier over four academic/behavioral signals.
//! Weights are fit with deterministic gradient descent, persisted as a
//! JSON artifact, and applied through [`DropoutModel::predict`].
//!
//! The model is an explicit value: load it once per command and pass it
//! by reference. Retraining produces a new value, never an in-place
//! mutation, so swapping models is pure substitution.

pub mod features;
pub mod metrics;
pub mod model;
pub mod store;
pub mod synthetic;
pub mod train;

pub use features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use metrics::{ClassMetrics, ConfusionMatrix, EvalReport};
pub use model::{DropoutModel, Prediction};
pub use store::{load_model, save_model, ModelArtifact};
pub use synthetic::{generate, DEFAULT_SEED, DEFAULT_SYNTHETIC_SAMPLES};
pub use train::{train, LabeledSample, TrainConfig, TrainOutcome};

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the classifier core.
#[derive(Debug, Error)]
pub enum ModelError {
    /// No artifact at the expected path. Inference cannot proceed; the
    /// caller should train or bootstrap first.
    #[error(
        "no trained model at {}. Run `edurisk train` or `edurisk bootstrap` first",
        .path.display()
    )]
    NotFound { path: PathBuf },

    /// Feature vector length does not match the model's weight length.
    /// Never silently truncated or padded.
    #[error("feature dimension mismatch: model has {expected} weights, input has {actual} features")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Missing or malformed training dataset. Fatal before any fitting.
    #[error("training data error: {0}")]
    TrainingData(String),

    #[error("model artifact I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("model artifact encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}
