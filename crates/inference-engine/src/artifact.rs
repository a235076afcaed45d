//! Serialized Artifacts
//!
//! JSON artifacts are tagged by `kind`. A model file may also be an ONNX
//! graph, recognised by its `.onnx` extension.

use crate::model::{LinearRegression, Regressor, TreeEnsemble};
use crate::scaler::StandardScaler;
use crate::InferenceError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the fitted artifacts live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Model, pipeline, or ONNX graph
    pub model_path: PathBuf,
    /// Separate scaler, when the model file does not embed one
    #[serde(default)]
    pub scaler_path: Option<PathBuf>,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("housing_model.json"),
            scaler_path: Some(PathBuf::from("housing_scaler.json")),
        }
    }
}

/// Any JSON artifact file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Artifact {
    StandardScaler(StandardScaler),
    LinearRegression(LinearRegression),
    TreeEnsemble(TreeEnsemble),
    Pipeline(PipelineArtifact),
}

/// A model artifact without a scaler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    LinearRegression(LinearRegression),
    TreeEnsemble(TreeEnsemble),
}

impl ModelArtifact {
    fn check(&self) -> Result<(), String> {
        match self {
            ModelArtifact::LinearRegression(m) => m.check(),
            ModelArtifact::TreeEnsemble(m) => m.check(),
        }
    }

    /// Box the model behind the regressor interface
    pub fn into_regressor(self) -> Box<dyn Regressor> {
        match self {
            ModelArtifact::LinearRegression(m) => Box::new(m),
            ModelArtifact::TreeEnsemble(m) => Box::new(m),
        }
    }
}

/// Scaler and model fitted together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineArtifact {
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
    pub model: ModelArtifact,
}

impl Artifact {
    fn check(&self) -> Result<(), String> {
        match self {
            Artifact::StandardScaler(s) => s.check(),
            Artifact::LinearRegression(m) => m.check(),
            Artifact::TreeEnsemble(m) => m.check(),
            Artifact::Pipeline(p) => {
                if let Some(scaler) = &p.scaler {
                    scaler.check()?;
                }
                p.model.check()
            }
        }
    }

    /// Artifact kind as written in the file
    pub fn kind(&self) -> &'static str {
        match self {
            Artifact::StandardScaler(_) => "standard_scaler",
            Artifact::LinearRegression(_) => "linear_regression",
            Artifact::TreeEnsemble(_) => "tree_ensemble",
            Artifact::Pipeline(_) => "pipeline",
        }
    }

    /// Split into optional scaler and optional model parts
    pub fn into_parts(self) -> (Option<StandardScaler>, Option<ModelArtifact>) {
        match self {
            Artifact::StandardScaler(s) => (Some(s), None),
            Artifact::LinearRegression(m) => (None, Some(ModelArtifact::LinearRegression(m))),
            Artifact::TreeEnsemble(m) => (None, Some(ModelArtifact::TreeEnsemble(m))),
            Artifact::Pipeline(p) => (p.scaler, Some(p.model)),
        }
    }
}

/// Whether a path names an ONNX graph
pub(crate) fn is_onnx(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("onnx"))
        .unwrap_or(false)
}

/// Read and validate a JSON artifact
pub fn read_artifact(path: &Path) -> Result<Artifact, InferenceError> {
    if !path.is_file() {
        return Err(InferenceError::ArtifactNotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path).map_err(|e| InferenceError::InvalidArtifact {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let artifact: Artifact =
        serde_json::from_slice(&bytes).map_err(|e| InferenceError::InvalidArtifact {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    artifact
        .check()
        .map_err(|reason| InferenceError::InvalidArtifact {
            path: path.to_path_buf(),
            reason,
        })?;

    debug!("Read {} artifact from {}", artifact.kind(), path.display());
    Ok(artifact)
}
