//! Categorical encoding tables.
//!
//! These mappings must stay identical to the encoding the model was trained
//! with. Drift does not raise errors, it silently degrades predictions, so every
//! table is an explicit enum with an exhaustive mapping and a documented
//! default arm.

use super::record::RawValue;

/// ABO/Rh blood group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BloodGroup {
    APositive,
    ANegative,
    BPositive,
    BNegative,
    AbPositive,
    AbNegative,
    OPositive,
    ONegative,
}

impl BloodGroup {
    /// Parse the training-set notation (`A+`, `AB-`, ...). Matching is exact.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "A+" => Some(Self::APositive),
            "A-" => Some(Self::ANegative),
            "B+" => Some(Self::BPositive),
            "B-" => Some(Self::BNegative),
            "AB+" => Some(Self::AbPositive),
            "AB-" => Some(Self::AbNegative),
            "O+" => Some(Self::OPositive),
            "O-" => Some(Self::ONegative),
            _ => None,
        }
    }

    /// Integer code used by the model (1-8).
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::APositive => 1,
            Self::ANegative => 2,
            Self::BPositive => 3,
            Self::BNegative => 4,
            Self::AbPositive => 5,
            Self::AbNegative => 6,
            Self::OPositive => 7,
            Self::ONegative => 8,
        }
    }

    /// Encode a raw value. Empty, missing, non-text and unknown codes map to 0.
    #[must_use]
    pub fn encode(value: Option<&RawValue>) -> u8 {
        match value {
            Some(RawValue::Text(s)) => Self::parse(s).map_or(0, Self::code),
            _ => 0,
        }
    }
}

/// Menstrual cycle regularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Regular,
    Irregular,
}

impl CycleState {
    /// Accepts the training letters (`R`, `I`) and the questionnaire words
    /// (`regular`, `irregular`).
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "R" | "regular" => Some(Self::Regular),
            "I" | "irregular" => Some(Self::Irregular),
            _ => None,
        }
    }

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Regular => 0,
            Self::Irregular => 1,
        }
    }

    /// Encode a raw value; anything unrecognised encodes as 0 (regular).
    #[must_use]
    pub fn encode(value: Option<&RawValue>) -> u8 {
        match value {
            Some(RawValue::Text(s)) => Self::parse(s).map_or(0, Self::code),
            _ => 0,
        }
    }
}

/// Y/N marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "Y" => Some(Self::Yes),
            "N" => Some(Self::No),
            _ => None,
        }
    }

    /// Letter form, as stored in the training data.
    #[must_use]
    pub fn letter(self) -> &'static str {
        match self {
            Self::Yes => "Y",
            Self::No => "N",
        }
    }

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Yes => 1,
            Self::No => 0,
        }
    }

    /// Interpret a numeric questionnaire flag: only a value equal to 1
    /// (number 1 or boolean true) is `Yes`. 0, 2, -1, strings and absent
    /// values are all `No`.
    #[must_use]
    pub fn from_flag(value: Option<&RawValue>) -> Self {
        match value {
            Some(RawValue::Number(n)) if *n == 1.0 => Self::Yes,
            Some(RawValue::Bool(true)) => Self::Yes,
            _ => Self::No,
        }
    }

    /// Encode a letter marker through the table; unknown markers map to 0.
    #[must_use]
    pub fn encode_letter(letter: &str) -> u8 {
        Self::parse(letter).map_or(0, Self::code)
    }

    /// Encode a raw Y/N marker (e.g. `pregnant`).
    #[must_use]
    pub fn encode(value: Option<&RawValue>) -> u8 {
        match value {
            Some(RawValue::Text(s)) => Self::encode_letter(s),
            _ => 0,
        }
    }
}
