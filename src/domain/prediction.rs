//! Pipeline outputs: feature vectors, predictions and introspection reports.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Label the model uses for "at risk".
pub const POSITIVE_LABEL: i64 = 1;

/// Names and values of a feature vector disagree in length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Feature vector has {names} names but {values} values")]
pub struct ShapeError {
    pub names: usize,
    pub values: usize,
}

/// Fixed-length, fixed-order numeric model input.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    names: Arc<[String]>,
    values: Vec<f64>,
}

impl FeatureVector {
    /// Build a vector from its ordered names and values.
    ///
    /// # Errors
    /// Returns `ShapeError` if the lengths differ.
    pub fn new(names: Arc<[String]>, values: Vec<f64>) -> Result<Self, ShapeError> {
        if names.len() != values.len() {
            return Err(ShapeError {
                names: names.len(),
                values: values.len(),
            });
        }
        Ok(Self { names, values })
    }

    /// Build from parts already known to have matching lengths.
    pub(crate) fn from_parts(names: Arc<[String]>, values: Vec<f64>) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Self { names, values }
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of the named feature.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.values[i])
    }

    /// `(name, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Outcome of a single prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Class id returned by the model.
    #[serde(rename = "prediction")]
    pub label: i64,

    /// Confidence in [0, 1].
    pub confidence: f64,
}

impl PredictionResult {
    #[must_use]
    pub fn new(label: i64, confidence: f64) -> Self {
        Self { label, confidence }
    }

    #[must_use]
    pub fn is_at_risk(&self) -> bool {
        self.label == POSITIVE_LABEL
    }

    /// Human-readable verdict.
    #[must_use]
    pub fn verdict(&self) -> &'static str {
        if self.is_at_risk() {
            "PCOS Risk"
        } else {
            "No PCOS Risk"
        }
    }
}

impl std::fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (label={}, confidence={:.2}%)",
            self.verdict(),
            self.label,
            self.confidence * 100.0
        )
    }
}

/// Diagnostic view of the loaded schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDescription {
    pub count: usize,
    pub names: Vec<String>,
}

/// Description of the loaded model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_type: String,
    pub expected_features: usize,
    pub feature_names: Vec<String>,
}

/// Liveness report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub model_loaded: bool,
}
