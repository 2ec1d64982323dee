//! Classifier port: Trait for the trained risk model.
//!
//! The pipeline treats the model as opaque. It only needs the declared
//! feature list, a label prediction and, when available, a class distribution.

use crate::domain::FeatureVector;

/// Errors raised by a classifier implementation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifierError {
    #[error("Feature dimension mismatch: got {got}, expected {expected}")]
    DimensionMismatch { got: usize, expected: usize },

    #[error("Capability not supported: {0}")]
    Unsupported(&'static str),

    #[error("Model computation failed: {0}")]
    Computation(String),
}

/// Trait for a binary risk classifier.
///
/// Implementations must be safe to call from several threads at once; the
/// pipeline never mutates a classifier after startup.
pub trait Classifier: Send + Sync {
    /// Model family name, for diagnostics.
    fn model_type(&self) -> &str;

    /// Ordered feature names the model was trained on.
    fn feature_names(&self) -> &[String];

    /// Predict a class label.
    ///
    /// # Errors
    /// Returns `ClassifierError` if the vector does not fit the model or the
    /// computation fails.
    fn predict(&self, features: &FeatureVector) -> Result<i64, ClassifierError>;

    /// Class probability distribution.
    ///
    /// Models without calibrated probabilities keep the default, which
    /// reports the capability as unsupported.
    ///
    /// # Errors
    /// Returns `ClassifierError::Unsupported` when not available.
    fn predict_proba(&self, _features: &FeatureVector) -> Result<Vec<f64>, ClassifierError> {
        Err(ClassifierError::Unsupported("predict_proba"))
    }
}
