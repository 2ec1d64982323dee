//! Feature normalizer: raw questionnaire answers to the model's feature vector.
//!
//! The pipeline runs in fixed steps:
//! 1. Impute defaults for absent, null or blank fields, and for zero lab
//!    readings
//! 2. Coerce continuous fields to `f64` (non-numeric text is rejected)
//! 3. Turn numeric flags into `Y`/`N` letters, then encode the letters
//! 4. Derive the waist:hip and FSH/LH ratios with guarded division
//! 5. Encode blood group and cycle codes (unknown codes become 0)
//! 6. Project the working record onto the schema, in schema order
//!
//! Missing or unrecognised categorical input is never an error: producing a
//! prediction is preferred over rejecting the request.

use crate::application::SchemaRegistry;
use crate::domain::{
    BloodGroup, Column, CycleState, FeatureVector, RawRecord, RawValue, Source, YesNo,
    COLUMN_COUNT, FSH_LH_FALLBACK, WAIST_HIP_FALLBACK,
};
use crate::{GynaiError, Result};

/// Normalize a raw record against the loaded schema.
///
/// # Errors
/// Returns `GynaiError::SchemaUnavailable` if no schema is loaded and
/// `GynaiError::MalformedField` if a continuous field holds non-numeric text.
pub fn normalize(raw: &RawRecord, schema: Option<&SchemaRegistry>) -> Result<FeatureVector> {
    let schema = schema.ok_or(GynaiError::SchemaUnavailable)?;
    let working = WorkingRecord::build(raw)?;

    let values: Vec<f64> = schema.columns().iter().map(|&c| working.get(c)).collect();

    tracing::debug!(
        "Normalized record: {} supplied fields -> {} features",
        raw.len(),
        values.len()
    );

    Ok(FeatureVector::from_parts(schema.shared_names(), values))
}

/// Every known column, fully encoded, before projection.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingRecord {
    values: [f64; COLUMN_COUNT],
}

impl WorkingRecord {
    /// Run imputation, coercion, encoding and derivation over all columns.
    ///
    /// # Errors
    /// Returns `GynaiError::MalformedField` for non-numeric continuous input.
    pub fn build(raw: &RawRecord) -> Result<Self> {
        let mut values = [0.0; COLUMN_COUNT];

        for column in Column::ALL {
            values[column.index()] = match column.source() {
                Source::Constant(v) => v,
                Source::Field {
                    key,
                    default,
                    zero_is_missing,
                } => match numeric(raw, key)? {
                    Some(_) if zero_is_missing && raw.present(key).is_some_and(RawValue::is_zero) => {
                        default
                    }
                    Some(v) => v,
                    None => default,
                },
                Source::BloodGroup { key } => f64::from(BloodGroup::encode(raw.present(key))),
                Source::Cycle { key } => f64::from(CycleState::encode(raw.present(key))),
                Source::Marker { key } => f64::from(YesNo::encode(raw.present(key))),
                Source::Flag { key } => {
                    let letter = YesNo::from_flag(raw.present(key)).letter();
                    f64::from(YesNo::encode_letter(letter))
                }
                // Filled in once their inputs are settled.
                Source::WaistHipRatio | Source::FshLhRatio => 0.0,
            };
        }

        let waist = supplied(raw, Column::Waist)?;
        let hip = supplied(raw, Column::Hip)?;
        values[Column::WaistHipRatio.index()] = match (waist, hip) {
            (Some(w), Some(h)) if w > 0.0 && h > 0.0 => w / h,
            _ => WAIST_HIP_FALLBACK,
        };

        let fsh = values[Column::Fsh.index()];
        values[Column::FshLhRatio.index()] = match supplied(raw, Column::Lh)? {
            Some(lh) if lh > 0.0 => fsh / lh,
            _ => FSH_LH_FALLBACK,
        };

        Ok(Self { values })
    }

    #[must_use]
    pub fn get(&self, column: Column) -> f64 {
        self.values[column.index()]
    }
}

/// Value of a numeric field as supplied by the client, before imputation.
fn supplied(raw: &RawRecord, column: Column) -> Result<Option<f64>> {
    match column.client_key() {
        Some(key) => numeric(raw, key),
        None => Ok(None),
    }
}

/// Coerce a client field to `f64`; `None` when absent or blank.
fn numeric(raw: &RawRecord, key: &str) -> Result<Option<f64>> {
    let Some(value) = raw.present(key) else {
        return Ok(None);
    };

    let parsed = match value {
        RawValue::Number(n) => Some(*n),
        RawValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        RawValue::Text(s) => s.trim().parse::<f64>().ok(),
        RawValue::Null => return Ok(None),
        RawValue::Other(_) => None,
    };

    match parsed {
        Some(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(GynaiError::MalformedField {
            field: key.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> SchemaRegistry {
        SchemaRegistry::full()
    }

    fn value(v: &FeatureVector, column: Column) -> f64 {
        v.get(column.header()).expect("Column present")
    }

    #[test]
    fn test_missing_schema() {
        let result = normalize(&RawRecord::new(), None);
        assert!(matches!(result, Err(GynaiError::SchemaUnavailable)));
    }

    #[test]
    fn test_all_fields_omitted_yields_defaults() {
        let schema = full();
        let v = normalize(&RawRecord::new(), Some(&schema)).expect("Should normalize");

        let expected = [
            1.0, 1000.0, 25.0, 60.0, 160.0, 23.4, 0.0, 72.0, 16.0, 12.5, 0.0, 28.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 5.0, 4.0, 1.25, 36.0, 28.0, 0.78, 2.5, 3.0, 15.0, 30.0, 10.0, 95.0,
            0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 120.0, 80.0, 10.0, 10.0, 5.0, 5.0, 8.0,
        ];
        assert_eq!(v.len(), 43);
        assert_eq!(v.values(), &expected);
        for column in Column::ALL {
            assert_eq!(value(&v, column), column.default_value());
        }
    }

    #[test]
    fn test_blank_and_null_values_are_imputed() {
        let raw = RawRecord::new()
            .with("age", "")
            .with("bmi", RawValue::Null)
            .with("amh", "  ");
        let v = normalize(&raw, Some(&full())).expect("Should normalize");
        assert_eq!(value(&v, Column::Age), 25.0);
        assert_eq!(value(&v, Column::Bmi), 23.4);
        assert_eq!(value(&v, Column::Amh), 3.0);
    }

    #[test]
    fn test_numeric_coercion() {
        let raw = RawRecord::new()
            .with("age", " 31 ")
            .with("weight", 72.5)
            .with("marriageStatus", true);
        let v = normalize(&raw, Some(&full())).expect("Should normalize");
        assert_eq!(value(&v, Column::Age), 31.0);
        assert_eq!(value(&v, Column::Weight), 72.5);
        assert_eq!(value(&v, Column::MarriageYears), 1.0);
    }

    #[test]
    fn test_malformed_numeric_field() {
        for bad in ["thirty", "12kg", "NaN", "inf"] {
            let raw = RawRecord::new().with("age", bad);
            match normalize(&raw, Some(&full())) {
                Err(GynaiError::MalformedField { field, .. }) => assert_eq!(field, "age"),
                other => panic!("Expected MalformedField for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_non_finite_and_nested_numbers_are_rejected() {
        for bad in [
            RawValue::from(f64::NAN),
            RawValue::from(f64::INFINITY),
            RawValue::Other(serde_json::json!({"value": 31})),
            RawValue::Other(serde_json::json!([31])),
        ] {
            let raw = RawRecord::new().with("age", bad);
            assert!(matches!(
                normalize(&raw, Some(&full())),
                Err(GynaiError::MalformedField { .. })
            ));
        }
    }

    #[test]
    fn test_nested_values_are_lenient_outside_continuous_fields() {
        let raw: RawRecord = serde_json::from_str(
            r#"{"age": 30, "meta": {"source": "web"}, "bloodGroup": ["O+"],
                "cycle": {"code": "I"}, "pregnant": ["Y"], "pimples": [1]}"#,
        )
        .expect("Should parse");
        let v = normalize(&raw, Some(&full())).expect("Should normalize");

        assert_eq!(value(&v, Column::Age), 30.0);
        assert_eq!(value(&v, Column::BloodGroup), 0.0);
        assert_eq!(value(&v, Column::Cycle), 0.0);
        assert_eq!(value(&v, Column::Pregnant), 0.0);
        assert_eq!(value(&v, Column::Pimples), 0.0);
    }

    #[test]
    fn test_zero_lab_readings_are_imputed() {
        let schema = full();
        let raw = RawRecord::new().with("amh", 0).with("fsh", 0).with("endometrium", false);
        let v = normalize(&raw, Some(&schema)).expect("Should normalize");
        assert_eq!(value(&v, Column::Amh), 3.0);
        assert_eq!(value(&v, Column::Fsh), 5.0);
        assert_eq!(value(&v, Column::Endometrium), 8.0);

        // LH column is imputed, the ratio still sees the supplied zero.
        let v = normalize(&RawRecord::new().with("lh", 0), Some(&schema)).expect("ok");
        assert_eq!(value(&v, Column::Lh), 4.0);
        assert_eq!(value(&v, Column::FshLhRatio), FSH_LH_FALLBACK);

        // Non-lab fields keep a supplied zero, and so does the text "0".
        let raw = RawRecord::new()
            .with("abortions", 0)
            .with("marriageStatus", 0)
            .with("hip", 0)
            .with("tsh", "0");
        let v = normalize(&raw, Some(&schema)).expect("ok");
        assert_eq!(value(&v, Column::Abortions), 0.0);
        assert_eq!(value(&v, Column::Hip), 0.0);
        assert_eq!(value(&v, Column::Tsh), 0.0);

        // Non-zero readings pass through.
        let v = normalize(&RawRecord::new().with("amh", 7.5), Some(&schema)).expect("ok");
        assert_eq!(value(&v, Column::Amh), 7.5);
    }

    #[test]
    fn test_malformed_ratio_input_is_rejected() {
        let raw = RawRecord::new().with("lh", "high");
        assert!(matches!(
            normalize(&raw, Some(&full())),
            Err(GynaiError::MalformedField { .. })
        ));
    }

    #[test]
    fn test_waist_hip_ratio() {
        let schema = full();
        let raw = RawRecord::new().with("waist", 30).with("hip", 40);
        let v = normalize(&raw, Some(&schema)).expect("Should normalize");
        assert!((value(&v, Column::WaistHipRatio) - 0.75).abs() < 1e-12);

        for raw in [
            RawRecord::new().with("waist", 0).with("hip", 40),
            RawRecord::new().with("waist", 30).with("hip", 0),
            RawRecord::new().with("waist", 30).with("hip", -2),
            RawRecord::new().with("waist", 30),
            RawRecord::new().with("hip", 40),
        ] {
            let v = normalize(&raw, Some(&schema)).expect("Should normalize");
            assert_eq!(value(&v, Column::WaistHipRatio), WAIST_HIP_FALLBACK);
        }
    }

    #[test]
    fn test_fsh_lh_ratio() {
        let schema = full();
        let raw = RawRecord::new().with("fsh", 6.0).with("lh", 3.0);
        let v = normalize(&raw, Some(&schema)).expect("Should normalize");
        assert!((value(&v, Column::FshLhRatio) - 2.0).abs() < 1e-12);

        // Imputed FSH is used as numerator.
        let raw = RawRecord::new().with("lh", 2.0);
        let v = normalize(&raw, Some(&schema)).expect("Should normalize");
        assert!((value(&v, Column::FshLhRatio) - 2.5).abs() < 1e-12);

        for raw in [
            RawRecord::new().with("fsh", 6.0).with("lh", 0),
            RawRecord::new().with("fsh", 6.0).with("lh", -1),
            RawRecord::new().with("fsh", 6.0),
        ] {
            let v = normalize(&raw, Some(&schema)).expect("Should normalize");
            assert_eq!(value(&v, Column::FshLhRatio), FSH_LH_FALLBACK);
        }
    }

    #[test]
    fn test_binary_flags() {
        let schema = full();
        let flags = [
            ("weightGain", Column::WeightGain),
            ("hairGrowth", Column::HairGrowth),
            ("skinDarkening", Column::SkinDarkening),
            ("hairLoss", Column::HairLoss),
            ("pimples", Column::Pimples),
            ("fastFood", Column::FastFood),
            ("regExercise", Column::RegularExercise),
        ];
        for (key, column) in flags {
            let on = normalize(&RawRecord::new().with(key, 1), Some(&schema)).expect("ok");
            assert_eq!(value(&on, column), 1.0, "{key}=1");

            for off in [RawValue::from(0), RawValue::from(2), RawValue::from(-1), "1".into()] {
                let v = normalize(&RawRecord::new().with(key, off), Some(&schema)).expect("ok");
                assert_eq!(value(&v, column), 0.0, "{key}");
            }
        }
    }

    #[test]
    fn test_categoricals() {
        let raw = RawRecord::new()
            .with("bloodGroup", "AB-")
            .with("cycle", "irregular")
            .with("pregnant", "Y");
        let v = normalize(&raw, Some(&full())).expect("Should normalize");
        assert_eq!(value(&v, Column::BloodGroup), 6.0);
        assert_eq!(value(&v, Column::Cycle), 1.0);
        assert_eq!(value(&v, Column::Pregnant), 1.0);

        let raw = RawRecord::new()
            .with("bloodGroup", "Z")
            .with("cycle", 4)
            .with("pregnant", "maybe");
        let v = normalize(&raw, Some(&full())).expect("Unknown codes are not errors");
        assert_eq!(value(&v, Column::BloodGroup), 0.0);
        assert_eq!(value(&v, Column::Cycle), 0.0);
        assert_eq!(value(&v, Column::Pregnant), 0.0);
    }

    #[test]
    fn test_projection_follows_schema_order() {
        let schema = SchemaRegistry::from_feature_names(&[
            "Waist:Hip Ratio",
            "Blood Group",
            " Age (yrs)",
        ])
        .expect("Should resolve");
        let raw = RawRecord::new()
            .with("age", 40)
            .with("patientFileNo", 4242)
            .with("bloodGroup", "B+");

        let v = normalize(&raw, Some(&schema)).expect("Should normalize");
        assert_eq!(v.names(), schema.feature_names());
        assert_eq!(v.values(), &[0.78, 3.0, 40.0]);
        assert!(v.get("Patient File No.").is_none());
        assert!(v.get("Sl. No").is_none());
    }

    #[test]
    fn test_end_to_end_example() {
        let raw: RawRecord = serde_json::from_str(
            r#"{"age":25,"weight":60,"height":160,"bmi":23.4,"bloodGroup":"O+",
                "cycle":"regular","pregnant":"N","weightGain":0}"#,
        )
        .expect("Should parse");
        let v = normalize(&raw, Some(&full())).expect("Should normalize");

        assert_eq!(value(&v, Column::BloodGroup), 7.0);
        assert_eq!(value(&v, Column::WaistHipRatio), 0.78);
        assert_eq!(value(&v, Column::FshLhRatio), 1.25);
        assert_eq!(value(&v, Column::Cycle), 0.0);
        assert_eq!(value(&v, Column::WeightGain), 0.0);
    }
}
