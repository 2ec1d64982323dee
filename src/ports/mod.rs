//! Ports layer: Trait definitions for external operations.
//!
//! These traits define the boundaries between the pipeline and the trained
//! model, and the seam for swapping confidence policies.

mod classifier;
mod confidence;

pub use classifier::{Classifier, ClassifierError};
pub use confidence::{ConfidenceEstimator, FixedConfidence, MaxProbability, FALLBACK_CONFIDENCE};
