//! Adapters layer: Concrete implementations of ports.
//!
//! - `logistic`: JSON logistic regression artifacts behind `Classifier`
//! - `sanitize`: identifier filtering for logs

pub mod logistic;
pub mod sanitize;

pub use logistic::{LogisticArtifact, LogisticModel, ModelLoadError};
