//! # Gynai
//!
//! Questionnaire normalization and PCOS risk inference.
//!
//! This crate provides:
//! - A feature normalizer turning loosely typed questionnaire answers into the
//!   exact numeric vector the trained model expects
//! - An inference service deriving a label and a confidence score
//! - A JSON logistic-model adapter with artifact integrity pinning
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (column catalogue, encodings, records, predictions)
//! - `ports`: Trait definitions for the model and the confidence policy
//! - `adapters`: Concrete implementations (logistic model, log sanitizer)
//! - `application`: Schema registry, normalizer and inference service
//! - `config`: Environment-driven settings

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::{InferenceService, PipelineContext, SchemaRegistry};
pub use domain::{FeatureVector, PredictionResult, RawRecord, RawValue};

/// Result type for Gynai operations
pub type Result<T> = std::result::Result<T, GynaiError>;

/// Main error type for Gynai
#[derive(Debug, thiserror::Error)]
pub enum GynaiError {
    #[error("Feature schema unavailable: model was not loaded")]
    SchemaUnavailable,

    #[error("Malformed field '{field}': expected a number, got {value}")]
    MalformedField { field: String, value: String },

    #[error("Model unavailable")]
    ModelUnavailable,

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Invalid feature vector: {0}")]
    Shape(#[from] domain::ShapeError),

    #[error("Model load failed: {0}")]
    ModelLoad(#[from] adapters::ModelLoadError),

    #[error("Invalid feature schema: {0}")]
    Schema(#[from] application::SchemaError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
