//! Model artifact persistence
//!
//! Saves fitted parameters as a JSON artifact and loads them back
//! exactly: serde_json round-trips every f64 bit-for-bit, so a loaded
//! model predicts identically to the one that was saved.
//!
//! Writes go to a sibling temp file first and are renamed into place,
//! so a concurrent load never observes a torn artifact.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::features::FEATURE_NAMES;
use super::model::DropoutModel;
use super::ModelError;

/// On-disk form of a trained model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Feature names in weight order, for human inspection of the file.
    pub feature_names: Vec<String>,
    pub weights: Vec<f64>,
    pub bias: f64,
    /// RFC 3339 timestamp. Metadata only; never affects inference.
    pub trained_at: String,
}

impl ModelArtifact {
    pub fn from_model(model: &DropoutModel) -> Self {
        Self {
            feature_names: FEATURE_NAMES.iter().map(|n| n.to_string()).collect(),
            weights: model.weights().to_vec(),
            bias: model.bias(),
            trained_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn into_model(self) -> DropoutModel {
        DropoutModel::new(self.weights, self.bias)
    }
}

/// Persist a model, overwriting any previous artifact at `path`.
pub fn save_model(model: &DropoutModel, path: &Path) -> Result<(), ModelError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let artifact = ModelArtifact::from_model(model);
    let content = serde_json::to_string_pretty(&artifact)?;

    // Write-then-rename keeps the overwrite atomic on the same filesystem.
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, content)?;
    fs::rename(&tmp_path, path)?;

    info!(path = %path.display(), "saved model artifact");
    Ok(())
}

/// Load a model from its artifact.
///
/// An absent artifact is [`ModelError::NotFound`]: callers should tell
/// the user to train or bootstrap, never fall back to a default model.
pub fn load_model(path: &Path) -> Result<DropoutModel, ModelError> {
    if !path.exists() {
        return Err(ModelError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    let artifact: ModelArtifact = serde_json::from_str(&content)?;
    Ok(artifact.into_model())
}

/// Load the artifact itself, for status-style introspection.
pub fn load_artifact(path: &Path) -> Result<ModelArtifact, ModelError> {
    if !path.exists() {
        return Err(ModelError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::features::FeatureVector;
    use tempfile::TempDir;

    #[test]
    fn test_save_load_round_trip_is_exact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dropout_model.json");

        let model = DropoutModel::new(vec![-0.137, -0.91, 0.4821, 0.253], 13.77);
        save_model(&model, &path).unwrap();
        let loaded = load_model(&path).unwrap();

        assert_eq!(model.weights(), loaded.weights());
        assert_eq!(model.bias().to_bits(), loaded.bias().to_bits());

        let v = FeatureVector::new(61.0, 5.2, 3, 1);
        let before = model.probability(&v).unwrap();
        let after = loaded.probability(&v).unwrap();
        assert!((before - after).abs() < 1e-9);
    }

    #[test]
    fn test_save_overwrites_previous_artifact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dropout_model.json");

        save_model(&DropoutModel::new(vec![1.0, 2.0, 3.0, 4.0], 0.0), &path).unwrap();
        save_model(&DropoutModel::new(vec![5.0, 6.0, 7.0, 8.0], 1.0), &path).unwrap();

        let loaded = load_model(&path).unwrap();
        assert_eq!(loaded.weights(), &[5.0, 6.0, 7.0, 8.0]);
        // No stray temp file left behind.
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_missing_artifact_is_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.json");
        match load_model(&path) {
            Err(ModelError::NotFound { path: p }) => assert_eq!(p, path),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_corrupt_artifact_is_encoding_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dropout_model.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            load_model(&path),
            Err(ModelError::Encoding(_))
        ));
    }
}
