//! Application layer: Use cases and services.
//!
//! This module turns raw questionnaire records into predictions using the
//! domain types and the classifier port.

mod context;
mod inference;
pub mod normalizer;
mod registry;

pub use context::PipelineContext;
pub use inference::InferenceService;
pub use normalizer::{normalize, WorkingRecord};
pub use registry::{SchemaError, SchemaRegistry};
