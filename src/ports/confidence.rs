//! Confidence port: Strategy for deriving a confidence score.

use crate::domain::FeatureVector;
use crate::ports::Classifier;

/// Confidence used when the model cannot provide a usable distribution.
pub const FALLBACK_CONFIDENCE: f64 = 0.75;

/// Derives a confidence in [0, 1] for a prediction.
///
/// Estimators never fail: any problem obtaining probabilities resolves to a
/// deterministic fallback.
pub trait ConfidenceEstimator: Send + Sync {
    fn estimate(&self, classifier: &dyn Classifier, features: &FeatureVector) -> f64;
}

/// Maximum class probability, or a fixed fallback when probabilities are
/// unsupported, fail, or come back empty or out of range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxProbability {
    fallback: f64,
}

impl MaxProbability {
    #[must_use]
    pub fn new(fallback: f64) -> Self {
        Self { fallback }
    }

    #[must_use]
    pub fn fallback(&self) -> f64 {
        self.fallback
    }
}

impl Default for MaxProbability {
    fn default() -> Self {
        Self::new(FALLBACK_CONFIDENCE)
    }
}

impl ConfidenceEstimator for MaxProbability {
    fn estimate(&self, classifier: &dyn Classifier, features: &FeatureVector) -> f64 {
        let distribution = match classifier.predict_proba(features) {
            Ok(d) => d,
            Err(e) => {
                tracing::debug!("Probabilities unavailable ({e}), using fallback confidence");
                return self.fallback;
            }
        };

        let max = distribution.iter().copied().fold(f64::NAN, f64::max);
        if (0.0..=1.0).contains(&max) {
            max
        } else {
            tracing::debug!(
                "Unusable probability distribution of {} entries, using fallback confidence",
                distribution.len()
            );
            self.fallback
        }
    }
}

/// Always reports the same confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedConfidence(pub f64);

impl ConfidenceEstimator for FixedConfidence {
    fn estimate(&self, _classifier: &dyn Classifier, _features: &FeatureVector) -> f64 {
        self.0
    }
}
