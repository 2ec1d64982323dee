//! Logistic model adapter: Implementation of `Classifier` for JSON artifacts.
//!
//! The offline training pipeline exports a standardized logistic regression
//! as JSON. This adapter loads it, checks it for internal consistency and,
//! when a manifest is present, verifies the artifact against its pinned
//! SHA-256 digest before trusting a single coefficient.
//!
//! # Artifact layout
//!
//! ```text
//! models/
//!   pcos_model.json   model parameters
//!   manifest.json     {"version": 1, "files": {"pcos_model.json": "<sha256 hex>"}}
//! ```
//!
//! When a directory is given instead of a file, `model.json` is loaded from it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::FeatureVector;
use crate::ports::{Classifier, ClassifierError};

/// Manifest file expected next to the artifact.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Artifact name used when loading from a directory.
const DEFAULT_MODEL_FILE: &str = "model.json";

/// Errors loading a model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid model format: {0}")]
    Format(#[from] serde_json::Error),

    #[error("Inconsistent model parameters: {0}")]
    Invalid(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error(
        "Digest mismatch for {file}: expected {}.., got {}..",
        digest_prefix(.expected),
        digest_prefix(.actual)
    )]
    DigestMismatch {
        file: String,
        expected: String,
        actual: String,
    },
}

/// Model parameters exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticArtifact {
    #[serde(default = "default_model_type")]
    pub model_type: String,
    pub feature_names: Vec<String>,
    pub classes: Vec<i64>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub scaler_mean: Option<Vec<f64>>,
    #[serde(default)]
    pub scaler_scale: Option<Vec<f64>>,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_supports_proba")]
    pub supports_proba: bool,
}

fn default_model_type() -> String {
    "LogisticRegression".to_string()
}

fn default_threshold() -> f64 {
    0.5
}

fn default_supports_proba() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct ModelManifest {
    version: u32,
    files: BTreeMap<String, String>,
}

/// Hex digits of a digest shown in messages; full digests are redacted by the
/// log sanitizer.
const DIGEST_PREFIX_LEN: usize = 12;

fn digest_prefix(digest: &str) -> &str {
    digest.get(..DIGEST_PREFIX_LEN).unwrap_or(digest)
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Standardized logistic regression classifier.
#[derive(Debug, Clone)]
pub struct LogisticModel {
    artifact: LogisticArtifact,
}

impl LogisticModel {
    /// Build from parameters, validating their consistency.
    ///
    /// # Errors
    /// Returns `ModelLoadError::Invalid` if lengths disagree, the class list
    /// is not binary, a scale is not positive, or the threshold is outside
    /// (0, 1).
    pub fn from_artifact(artifact: LogisticArtifact) -> Result<Self, ModelLoadError> {
        let n = artifact.feature_names.len();
        if n == 0 {
            return Err(ModelLoadError::Invalid("feature_names is empty".into()));
        }
        if artifact.coefficients.len() != n {
            return Err(ModelLoadError::Invalid(format!(
                "{} coefficients for {n} features",
                artifact.coefficients.len()
            )));
        }
        if artifact.classes.len() != 2 {
            return Err(ModelLoadError::Invalid(format!(
                "expected 2 classes, got {}",
                artifact.classes.len()
            )));
        }
        if let Some(mean) = &artifact.scaler_mean {
            if mean.len() != n {
                return Err(ModelLoadError::Invalid(format!(
                    "scaler_mean has {} entries for {n} features",
                    mean.len()
                )));
            }
        }
        if let Some(scale) = &artifact.scaler_scale {
            if scale.len() != n {
                return Err(ModelLoadError::Invalid(format!(
                    "scaler_scale has {} entries for {n} features",
                    scale.len()
                )));
            }
            if scale.iter().any(|s| s.is_nan() || *s <= 0.0) {
                return Err(ModelLoadError::Invalid(
                    "scaler_scale entries must be positive".into(),
                ));
            }
        }
        if !(artifact.threshold > 0.0 && artifact.threshold < 1.0) {
            return Err(ModelLoadError::Invalid(format!(
                "threshold {} outside (0, 1)",
                artifact.threshold
            )));
        }
        Ok(Self { artifact })
    }

    /// Load an artifact from a file, or `model.json` inside a directory.
    ///
    /// If `manifest.json` sits next to the artifact, the artifact's SHA-256
    /// digest must match its manifest entry. With `require_manifest` set, a
    /// missing manifest is an error.
    ///
    /// # Errors
    /// Returns `ModelLoadError` if the artifact cannot be read, fails
    /// verification, or is inconsistent.
    pub fn load(path: &Path, require_manifest: bool) -> Result<Self, ModelLoadError> {
        let model_path = if path.is_dir() {
            path.join(DEFAULT_MODEL_FILE)
        } else {
            path.to_path_buf()
        };

        let bytes = std::fs::read(&model_path).map_err(|source| ModelLoadError::Io {
            path: model_path.clone(),
            source,
        })?;

        Self::verify_manifest(&model_path, &bytes, require_manifest)?;

        let artifact: LogisticArtifact = serde_json::from_slice(&bytes)?;
        let model = Self::from_artifact(artifact)?;

        tracing::info!(
            "Loaded model from {:?} (model_type={}, n_features={}, supports_proba={})",
            model_path,
            model.artifact.model_type,
            model.artifact.feature_names.len(),
            model.artifact.supports_proba
        );
        Ok(model)
    }

    fn verify_manifest(
        model_path: &Path,
        bytes: &[u8],
        require_manifest: bool,
    ) -> Result<(), ModelLoadError> {
        let dir = model_path.parent().unwrap_or_else(|| Path::new("."));
        let manifest_path = dir.join(MANIFEST_FILE);

        if !manifest_path.exists() {
            if require_manifest {
                return Err(ModelLoadError::Manifest(format!(
                    "{MANIFEST_FILE} not found in {dir:?}"
                )));
            }
            tracing::warn!("No {MANIFEST_FILE} next to {:?}; artifact digest not verified", model_path);
            return Ok(());
        }

        let content = std::fs::read(&manifest_path).map_err(|source| ModelLoadError::Io {
            path: manifest_path.clone(),
            source,
        })?;
        let manifest: ModelManifest = serde_json::from_slice(&content)
            .map_err(|e| ModelLoadError::Manifest(format!("invalid manifest: {e}")))?;
        if manifest.version != 1 {
            return Err(ModelLoadError::Manifest(format!(
                "unsupported manifest version {}",
                manifest.version
            )));
        }

        let file_name = model_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ModelLoadError::Manifest("artifact path has no file name".into()))?;
        let expected = manifest.files.get(file_name).ok_or_else(|| {
            ModelLoadError::Manifest(format!("{file_name} is not listed in {MANIFEST_FILE}"))
        })?;

        let actual = sha256_hex(bytes);
        if !expected.trim().eq_ignore_ascii_case(&actual) {
            return Err(ModelLoadError::DigestMismatch {
                file: file_name.to_string(),
                expected: expected.clone(),
                actual,
            });
        }

        tracing::info!("Model artifact digest verified against {MANIFEST_FILE}");
        Ok(())
    }

    /// Positive-class probability.
    fn positive_probability(&self, features: &FeatureVector) -> Result<f64, ClassifierError> {
        let a = &self.artifact;
        let x = features.values();
        if x.len() != a.coefficients.len() {
            return Err(ClassifierError::DimensionMismatch {
                got: x.len(),
                expected: a.coefficients.len(),
            });
        }

        let mut z = a.intercept;
        for (i, (&xi, &wi)) in x.iter().zip(&a.coefficients).enumerate() {
            let mean = a.scaler_mean.as_ref().map_or(0.0, |m| m[i]);
            let scale = a.scaler_scale.as_ref().map_or(1.0, |s| s[i]);
            z += wi * (xi - mean) / scale;
        }

        if !z.is_finite() {
            return Err(ClassifierError::Computation(format!(
                "non-finite decision value {z}"
            )));
        }
        Ok(sigmoid(z))
    }
}

impl Classifier for LogisticModel {
    fn model_type(&self) -> &str {
        &self.artifact.model_type
    }

    fn feature_names(&self) -> &[String] {
        &self.artifact.feature_names
    }

    fn predict(&self, features: &FeatureVector) -> Result<i64, ClassifierError> {
        let p = self.positive_probability(features)?;
        let classes = &self.artifact.classes;
        Ok(if p >= self.artifact.threshold {
            classes[1]
        } else {
            classes[0]
        })
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, ClassifierError> {
        if !self.artifact.supports_proba {
            return Err(ClassifierError::Unsupported("predict_proba"));
        }
        let p = self.positive_probability(features)?;
        Ok(vec![1.0 - p, p])
    }
}
