//! Domain layer: Core types of the questionnaire pipeline.
//!
//! Pure Rust types with no I/O: the column catalogue, encoding tables,
//! raw client records and prediction outputs.

mod column;
mod encoding;
mod prediction;
mod record;

pub use column::{
    Column, ColumnSpec, FeatureKind, Source, COLUMN_COUNT, FSH_LH_FALLBACK, WAIST_HIP_FALLBACK,
};
pub use encoding::{BloodGroup, CycleState, YesNo};
pub use prediction::{
    FeatureVector, HealthStatus, ModelInfo, PredictionResult, SchemaDescription, ShapeError,
    POSITIVE_LABEL,
};
pub use record::{RawRecord, RawValue};
