//! Price Inference Engine
//!
//! Loads the fitted scaler and regression artifacts once, checks them
//! against the feature layout, and turns feature vectors into prices.

mod artifact;
mod engine;
mod model;
mod onnx;
mod scaler;

pub use artifact::{read_artifact, Artifact, ArtifactConfig, ModelArtifact, PipelineArtifact};
pub use engine::{format_usd, Estimate, InferenceEngine};
pub use model::{Aggregation, LinearRegression, Node, Regressor, Tree, TreeEnsemble};
pub use onnx::OnnxRegressor;
pub use scaler::StandardScaler;

use feature_engine::FeatureSchema;
use std::path::PathBuf;
use thiserror::Error;

/// Errors during artifact loading and inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Artifact not found: {}", .0.display())]
    ArtifactNotFound(PathBuf),
    #[error("Invalid artifact {}: {reason}", path.display())]
    InvalidArtifact { path: PathBuf, reason: String },
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error(
        "{artifact} expects column {expected:?} at position {position}, encoder produces {found:?}"
    )]
    SchemaMismatch {
        artifact: String,
        position: usize,
        expected: String,
        found: String,
    },
    #[error("{artifact} was fit on {actual} columns, encoder produces {expected}")]
    WidthMismatch {
        artifact: String,
        expected: usize,
        actual: usize,
    },
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },
    #[error("Feature vector encoded as {actual:?}, model expects {expected:?}")]
    IncompatibleEncoding {
        expected: FeatureSchema,
        actual: FeatureSchema,
    },
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
}
