//! Catalogue of the training columns the pipeline knows how to produce.
//!
//! Headers are the exact column names of the training table, stray
//! whitespace and misspellings included (`" Age (yrs)"`, `"Marraige Status
//! (Yrs)"`). The model declares its features by these names, so they must not
//! be tidied up.

/// Fallback for `Waist:Hip Ratio` when waist or hip is missing or not positive.
pub const WAIST_HIP_FALLBACK: f64 = 0.78;

/// Fallback for `FSH/LH` when LH is missing or not positive.
pub const FSH_LH_FALLBACK: f64 = 1.25;

/// Semantic type of a schema entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    Continuous,
    BloodGroup,
    Cycle,
    BinaryFlag,
}

/// Where a column's value comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Source {
    /// Fixed working value, not supplied by clients.
    Constant(f64),
    /// Numeric client field with its clinical default. With
    /// `zero_is_missing`, a numeric 0 (or `false`) is imputed like an absent
    /// value.
    Field {
        key: &'static str,
        default: f64,
        zero_is_missing: bool,
    },
    /// Blood group code (`A+` .. `O-`).
    BloodGroup { key: &'static str },
    /// Cycle regularity marker.
    Cycle { key: &'static str },
    /// Y/N letter supplied directly.
    Marker { key: &'static str },
    /// Numeric flag, `1` means yes.
    Flag { key: &'static str },
    /// `waist / hip`.
    WaistHipRatio,
    /// `fsh / lh`.
    FshLhRatio,
}

/// Static description of one training column.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub header: &'static str,
    pub source: Source,
}

/// The 43 training columns, in training-table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    SerialNo,
    PatientFileNo,
    Age,
    Weight,
    Height,
    Bmi,
    BloodGroup,
    PulseRate,
    RespiratoryRate,
    Hemoglobin,
    Cycle,
    CycleLength,
    MarriageYears,
    Pregnant,
    Abortions,
    BetaHcg1,
    BetaHcg2,
    Fsh,
    Lh,
    FshLhRatio,
    Hip,
    Waist,
    WaistHipRatio,
    Tsh,
    Amh,
    Prolactin,
    VitaminD3,
    Progesterone,
    RandomBloodSugar,
    WeightGain,
    HairGrowth,
    SkinDarkening,
    HairLoss,
    Pimples,
    FastFood,
    RegularExercise,
    BpSystolic,
    BpDiastolic,
    FollicleCountLeft,
    FollicleCountRight,
    FollicleSizeLeft,
    FollicleSizeRight,
    Endometrium,
}

/// Number of known columns.
pub const COLUMN_COUNT: usize = 43;

const fn field(header: &'static str, key: &'static str, default: f64) -> ColumnSpec {
    ColumnSpec {
        header,
        source: Source::Field {
            key,
            default,
            zero_is_missing: false,
        },
    }
}

/// Laboratory and ultrasound readings, where 0 means "not measured".
const fn lab(header: &'static str, key: &'static str, default: f64) -> ColumnSpec {
    ColumnSpec {
        header,
        source: Source::Field {
            key,
            default,
            zero_is_missing: true,
        },
    }
}

const fn flag(header: &'static str, key: &'static str) -> ColumnSpec {
    ColumnSpec {
        header,
        source: Source::Flag { key },
    }
}

// Indexed by `Column as usize`; keep in declaration order.
const SPECS: [ColumnSpec; COLUMN_COUNT] = [
    ColumnSpec { header: "Sl. No", source: Source::Constant(1.0) },
    field("Patient File No.", "patientFileNo", 1000.0),
    field(" Age (yrs)", "age", 25.0),
    field("Weight (Kg)", "weight", 60.0),
    field("Height(Cm) ", "height", 160.0),
    field("BMI", "bmi", 23.4),
    ColumnSpec { header: "Blood Group", source: Source::BloodGroup { key: "bloodGroup" } },
    field("Pulse rate(bpm) ", "pulseRate", 72.0),
    field("RR (breaths/min)", "respiratoryRate", 16.0),
    field("Hb(g/dl)", "hb", 12.5),
    ColumnSpec { header: "Cycle(R/I)", source: Source::Cycle { key: "cycle" } },
    field("Cycle length(days)", "cycleLength", 28.0),
    field("Marraige Status (Yrs)", "marriageStatus", 0.0),
    ColumnSpec { header: "Pregnant(Y/N)", source: Source::Marker { key: "pregnant" } },
    field("No. of aborptions", "abortions", 0.0),
    lab(" I beta-HCG(mIU/mL)", "betaHCG1", 0.0),
    lab("II beta-HCG(mIU/mL)", "betaHCG2", 0.0),
    lab("FSH(mIU/mL)", "fsh", 5.0),
    lab("LH(mIU/mL)", "lh", 4.0),
    ColumnSpec { header: "FSH/LH", source: Source::FshLhRatio },
    field("Hip(inch)", "hip", 36.0),
    field("Waist(inch)", "waist", 28.0),
    ColumnSpec { header: "Waist:Hip Ratio", source: Source::WaistHipRatio },
    lab("TSH (mIU/L)", "tsh", 2.5),
    lab("AMH(ng/mL)", "amh", 3.0),
    lab("PRL(ng/mL)", "prl", 15.0),
    lab("Vit D3 (ng/mL)", "vitD3", 30.0),
    lab("PRG(ng/mL)", "prg", 10.0),
    lab("RBS(mg/dl)", "rbs", 95.0),
    flag("Weight gain(Y/N)", "weightGain"),
    flag("hair growth(Y/N)", "hairGrowth"),
    flag("Skin darkening (Y/N)", "skinDarkening"),
    flag("Hair loss(Y/N)", "hairLoss"),
    flag("Pimples(Y/N)", "pimples"),
    flag("Fast food (Y/N)", "fastFood"),
    flag("Reg.Exercise(Y/N)", "regExercise"),
    field("BP _Systolic (mmHg)", "bpSystolic", 120.0),
    field("BP _Diastolic (mmHg)", "bpDiastolic", 80.0),
    lab("Follicle No. (L)", "follicleNoL", 10.0),
    lab("Follicle No. (R)", "follicleNoR", 10.0),
    lab("Avg. F size (L) (mm)", "avgFSizeL", 5.0),
    lab("Avg. F size (R) (mm)", "avgFSizeR", 5.0),
    lab("Endometrium (mm)", "endometrium", 8.0),
];

impl Column {
    /// All columns in training-table order.
    pub const ALL: [Column; COLUMN_COUNT] = [
        Self::SerialNo,
        Self::PatientFileNo,
        Self::Age,
        Self::Weight,
        Self::Height,
        Self::Bmi,
        Self::BloodGroup,
        Self::PulseRate,
        Self::RespiratoryRate,
        Self::Hemoglobin,
        Self::Cycle,
        Self::CycleLength,
        Self::MarriageYears,
        Self::Pregnant,
        Self::Abortions,
        Self::BetaHcg1,
        Self::BetaHcg2,
        Self::Fsh,
        Self::Lh,
        Self::FshLhRatio,
        Self::Hip,
        Self::Waist,
        Self::WaistHipRatio,
        Self::Tsh,
        Self::Amh,
        Self::Prolactin,
        Self::VitaminD3,
        Self::Progesterone,
        Self::RandomBloodSugar,
        Self::WeightGain,
        Self::HairGrowth,
        Self::SkinDarkening,
        Self::HairLoss,
        Self::Pimples,
        Self::FastFood,
        Self::RegularExercise,
        Self::BpSystolic,
        Self::BpDiastolic,
        Self::FollicleCountLeft,
        Self::FollicleCountRight,
        Self::FollicleSizeLeft,
        Self::FollicleSizeRight,
        Self::Endometrium,
    ];

    /// Position in the working record.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn spec(self) -> &'static ColumnSpec {
        &SPECS[self.index()]
    }

    /// Training-table header.
    #[must_use]
    pub fn header(self) -> &'static str {
        self.spec().header
    }

    #[must_use]
    pub fn source(self) -> Source {
        self.spec().source
    }

    /// Client field this column reads, if any.
    #[must_use]
    pub fn client_key(self) -> Option<&'static str> {
        match self.source() {
            Source::Field { key, .. }
            | Source::BloodGroup { key }
            | Source::Cycle { key }
            | Source::Marker { key }
            | Source::Flag { key } => Some(key),
            Source::Constant(_) | Source::WaistHipRatio | Source::FshLhRatio => None,
        }
    }

    #[must_use]
    pub fn kind(self) -> FeatureKind {
        match self.source() {
            Source::BloodGroup { .. } => FeatureKind::BloodGroup,
            Source::Cycle { .. } => FeatureKind::Cycle,
            Source::Marker { .. } | Source::Flag { .. } => FeatureKind::BinaryFlag,
            Source::Constant(_)
            | Source::Field { .. }
            | Source::WaistHipRatio
            | Source::FshLhRatio => FeatureKind::Continuous,
        }
    }

    /// Encoded value the column takes when the client supplies nothing.
    #[must_use]
    pub fn default_value(self) -> f64 {
        match self.source() {
            Source::Constant(v) => v,
            Source::Field { default, .. } => default,
            Source::BloodGroup { .. }
            | Source::Cycle { .. }
            | Source::Marker { .. }
            | Source::Flag { .. } => 0.0,
            Source::WaistHipRatio => WAIST_HIP_FALLBACK,
            Source::FshLhRatio => FSH_LH_FALLBACK,
        }
    }

    /// Look a column up by its exact training header.
    #[must_use]
    pub fn from_header(header: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.header() == header)
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalogue_is_consistent() {
        for (i, column) in Column::ALL.iter().enumerate() {
            assert_eq!(column.index(), i);
        }
        let headers: HashSet<_> = Column::ALL.iter().map(|c| c.header()).collect();
        assert_eq!(headers.len(), COLUMN_COUNT);

        let keys: Vec<_> = Column::ALL.iter().filter_map(|c| c.client_key()).collect();
        let unique: HashSet<_> = keys.iter().collect();
        assert_eq!(keys.len(), unique.len());
    }

    #[test]
    fn test_header_lookup_is_exact() {
        assert_eq!(Column::from_header(" Age (yrs)"), Some(Column::Age));
        assert_eq!(Column::from_header("Age (yrs)"), None);
        assert_eq!(Column::from_header("Height(Cm) "), Some(Column::Height));
        assert_eq!(Column::from_header("Height(Cm)"), None);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(Column::BloodGroup.kind(), FeatureKind::BloodGroup);
        assert_eq!(Column::Cycle.kind(), FeatureKind::Cycle);
        assert_eq!(Column::Pregnant.kind(), FeatureKind::BinaryFlag);
        assert_eq!(Column::Pimples.kind(), FeatureKind::BinaryFlag);
        assert_eq!(Column::WaistHipRatio.kind(), FeatureKind::Continuous);
        assert_eq!(Column::Amh.kind(), FeatureKind::Continuous);
    }

    #[test]
    fn test_clinical_defaults() {
        assert_eq!(Column::Age.default_value(), 25.0);
        assert_eq!(Column::Bmi.default_value(), 23.4);
        assert_eq!(Column::Fsh.default_value(), 5.0);
        assert_eq!(Column::Lh.default_value(), 4.0);
        assert_eq!(Column::Amh.default_value(), 3.0);
        assert_eq!(Column::WaistHipRatio.default_value(), WAIST_HIP_FALLBACK);
        assert_eq!(Column::FshLhRatio.default_value(), FSH_LH_FALLBACK);
        assert_eq!(Column::BloodGroup.default_value(), 0.0);
    }
}
