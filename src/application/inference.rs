//! Inference service: Orchestrates normalization and model invocation.
//!
//! This service coordinates:
//! - Feature normalization against the loaded schema
//! - Label prediction (failures propagate)
//! - Confidence estimation (failures fall back, never propagate)
//! - Schema and model introspection

use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::application::{normalizer, PipelineContext};
use crate::domain::{
    FeatureVector, HealthStatus, ModelInfo, PredictionResult, RawRecord, SchemaDescription,
};
use crate::{GynaiError, Result};

/// Service for running risk predictions.
///
/// Cheap to clone and safe to share across threads: it only reads the
/// immutable [`PipelineContext`].
#[derive(Debug, Clone)]
pub struct InferenceService {
    ctx: Arc<PipelineContext>,
}

impl InferenceService {
    /// Create a new inference service.
    pub fn new(ctx: Arc<PipelineContext>) -> Self {
        Self { ctx }
    }

    #[must_use]
    pub fn context(&self) -> &PipelineContext {
        &self.ctx
    }

    /// Normalize a raw record into the model's feature vector.
    ///
    /// # Errors
    /// Returns `SchemaUnavailable` when no model is loaded and
    /// `MalformedField` for non-numeric continuous input.
    pub fn normalize(&self, raw: &RawRecord) -> Result<FeatureVector> {
        normalizer::normalize(raw, self.ctx.schema())
    }

    /// Run the model on a normalized vector.
    ///
    /// # Errors
    /// Returns `ModelUnavailable` when no model is loaded, and `Inference` if
    /// the vector does not match the schema or the model call fails.
    pub fn infer(&self, features: &FeatureVector) -> Result<PredictionResult> {
        let classifier = self.ctx.classifier().ok_or(GynaiError::ModelUnavailable)?;
        let schema = self.ctx.schema().ok_or(GynaiError::SchemaUnavailable)?;

        if features.names() != schema.feature_names() {
            return Err(GynaiError::Inference(format!(
                "Feature vector does not match schema: got {} columns, expected {} in model order",
                features.len(),
                schema.len()
            )));
        }

        tracing::debug!("Input shape: (1, {})", features.len());

        let label = classifier
            .predict(features)
            .map_err(|e| GynaiError::Inference(e.to_string()))?;
        let confidence = self.ctx.estimator().estimate(classifier, features);

        let result = PredictionResult::new(label, confidence);
        tracing::info!(
            "Inference complete: prediction={}, confidence={:.2}%",
            result.label,
            result.confidence * 100.0
        );
        Ok(result)
    }

    /// Normalize then infer.
    ///
    /// # Errors
    /// Any error from [`Self::normalize`] or [`Self::infer`].
    pub fn predict(&self, raw: &RawRecord) -> Result<PredictionResult> {
        let features = self.normalize(raw)?;
        self.infer(&features)
    }

    /// Predict many records on scoped worker threads.
    ///
    /// Results come back in input order; each record succeeds or fails on
    /// its own.
    pub fn predict_batch(&self, records: &[RawRecord]) -> Vec<Result<PredictionResult>> {
        if records.is_empty() {
            return Vec::new();
        }

        let workers = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
            .min(records.len());
        let chunk_size = records.len().div_ceil(workers);
        tracing::debug!(
            "Batch prediction: {} records across {} workers",
            records.len(),
            workers
        );

        std::thread::scope(|scope| {
            let handles: Vec<_> = records
                .chunks(chunk_size)
                .map(|chunk| {
                    let handle =
                        scope.spawn(move || chunk.iter().map(|r| self.predict(r)).collect::<Vec<_>>());
                    (chunk.len(), handle)
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|(len, handle)| {
                    handle.join().unwrap_or_else(|_| {
                        tracing::error!("Batch worker panicked");
                        (0..len)
                            .map(|_| Err(GynaiError::Inference("worker thread panicked".into())))
                            .collect()
                    })
                })
                .collect()
        })
    }

    /// Ordered feature names of the loaded model.
    ///
    /// # Errors
    /// Returns `SchemaUnavailable` when no model is loaded.
    pub fn describe_schema(&self) -> Result<SchemaDescription> {
        self.ctx
            .schema()
            .map(|s| s.describe())
            .ok_or(GynaiError::SchemaUnavailable)
    }

    /// Model family and declared features.
    ///
    /// # Errors
    /// Returns `ModelUnavailable` when no model is loaded.
    pub fn model_info(&self) -> Result<ModelInfo> {
        let classifier = self.ctx.classifier().ok_or(GynaiError::ModelUnavailable)?;
        let names = classifier.feature_names().to_vec();
        Ok(ModelInfo {
            model_type: classifier.model_type().to_string(),
            expected_features: names.len(),
            feature_names: names,
        })
    }

    #[must_use]
    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy".to_string(),
            model_loaded: self.ctx.is_model_loaded(),
        }
    }
}
