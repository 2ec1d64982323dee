//! Pipeline context: immutable state shared by every request.
//!
//! Built once at startup and passed by reference (or `Arc`) into every
//! normalize/infer call. When the model fails to load the context still
//! exists, without a model, so callers fail fast instead of attempting
//! partial inference.

use std::sync::Arc;

use crate::adapters::LogisticModel;
use crate::application::{SchemaError, SchemaRegistry};
use crate::config::Config;
use crate::ports::{Classifier, ConfidenceEstimator, MaxProbability};

struct LoadedModel {
    classifier: Arc<dyn Classifier>,
    schema: SchemaRegistry,
}

/// Loaded model, its schema and the confidence policy.
pub struct PipelineContext {
    model: Option<LoadedModel>,
    estimator: Arc<dyn ConfidenceEstimator>,
}

impl PipelineContext {
    /// Build a context around a loaded classifier.
    ///
    /// # Errors
    /// Returns `SchemaError` if the classifier's declared features cannot be
    /// produced by the normalizer.
    pub fn new(classifier: Arc<dyn Classifier>) -> Result<Self, SchemaError> {
        let schema = SchemaRegistry::from_feature_names(classifier.feature_names())?;
        tracing::info!(
            "Pipeline ready: model_type={}, n_features={}",
            classifier.model_type(),
            schema.len()
        );
        Ok(Self {
            model: Some(LoadedModel { classifier, schema }),
            estimator: Arc::new(MaxProbability::default()),
        })
    }

    /// A context with no model; every prediction fails fast.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            model: None,
            estimator: Arc::new(MaxProbability::default()),
        }
    }

    /// Load the configured model artifact.
    ///
    /// Load failures are logged and produce a context without a model, so a
    /// long-running host can keep answering health checks.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let estimator = MaxProbability::new(config.fallback_confidence);

        let model = match LogisticModel::load(&config.model_path, config.require_manifest) {
            Ok(model) => model,
            Err(e) => {
                tracing::error!("Error loading model from {:?}: {e}", config.model_path);
                return Self::unavailable().with_estimator(estimator);
            }
        };

        match Self::new(Arc::new(model)) {
            Ok(ctx) => ctx.with_estimator(estimator),
            Err(e) => {
                tracing::error!("Model schema rejected: {e}");
                Self::unavailable().with_estimator(estimator)
            }
        }
    }

    /// Replace the confidence policy.
    #[must_use]
    pub fn with_estimator<E>(mut self, estimator: E) -> Self
    where
        E: ConfidenceEstimator + 'static,
    {
        self.estimator = Arc::new(estimator);
        self
    }

    #[must_use]
    pub fn is_model_loaded(&self) -> bool {
        self.model.is_some()
    }

    #[must_use]
    pub fn schema(&self) -> Option<&SchemaRegistry> {
        self.model.as_ref().map(|m| &m.schema)
    }

    #[must_use]
    pub fn classifier(&self) -> Option<&dyn Classifier> {
        self.model.as_ref().map(|m| m.classifier.as_ref())
    }

    #[must_use]
    pub fn estimator(&self) -> &dyn ConfidenceEstimator {
        self.estimator.as_ref()
    }
}

impl std::fmt::Debug for PipelineContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineContext")
            .field("model_type", &self.classifier().map(|c| c.model_type()))
            .field("n_features", &self.schema().map(SchemaRegistry::len))
            .finish_non_exhaustive()
    }
}
