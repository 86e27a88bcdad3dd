use serde::{Deserialize, Serialize};

use crate::generators::types::{Operation, QuestionDetail, QuestionOutput};
use crate::sampler::{round_dp, ValueSampler};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionKind {
    CmToM,
    MToCm,
    MmToCm,
    CmToMm,
    GToKg,
    KgToG,
    MlToL,
    LToMl,
    PenceToPounds,
    PoundsToPence,
}

impl ConversionKind {
    pub fn factor(&self) -> f64 {
        match self {
            Self::CmToM => 0.01,
            Self::MToCm => 100.0,
            Self::MmToCm => 0.1,
            Self::CmToMm => 10.0,
            Self::GToKg => 0.001,
            Self::KgToG => 1000.0,
            Self::MlToL => 0.001,
            Self::LToMl => 1000.0,
            Self::PenceToPounds => 0.01,
            Self::PoundsToPence => 100.0,
        }
    }

    pub fn units(&self) -> (&'static str, &'static str) {
        match self {
            Self::CmToM => ("cm", "m"),
            Self::MToCm => ("m", "cm"),
            Self::MmToCm => ("mm", "cm"),
            Self::CmToMm => ("cm", "mm"),
            Self::GToKg => ("g", "kg"),
            Self::KgToG => ("kg", "g"),
            Self::MlToL => ("ml", "l"),
            Self::LToMl => ("l", "ml"),
            Self::PenceToPounds => ("p", "£"),
            Self::PoundsToPence => ("£", "p"),
        }
    }

    /// Decimal places needed for an exact result from an integer input.
    pub fn result_decimal_places(&self) -> u8 {
        match self {
            Self::CmToM | Self::PenceToPounds => 2,
            Self::MmToCm => 1,
            Self::GToKg | Self::MlToL => 3,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub conversions: Vec<ConversionKind>,
    pub max_value: i64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            conversions: vec![ConversionKind::MToCm, ConversionKind::CmToM],
            max_value: 100,
        }
    }
}

pub fn default_params(year: u8) -> Params {
    match year.clamp(1, 6) {
        1 | 2 => Params {
            conversions: vec![ConversionKind::PoundsToPence],
            max_value: 10,
        },
        3 => Params {
            conversions: vec![
                ConversionKind::MToCm,
                ConversionKind::KgToG,
                ConversionKind::LToMl,
            ],
            max_value: 20,
        },
        4 => Params {
            conversions: vec![
                ConversionKind::MToCm,
                ConversionKind::CmToM,
                ConversionKind::KgToG,
                ConversionKind::CmToMm,
                ConversionKind::PoundsToPence,
            ],
            max_value: 100,
        },
        5 => Params {
            conversions: vec![
                ConversionKind::CmToM,
                ConversionKind::MToCm,
                ConversionKind::MmToCm,
                ConversionKind::GToKg,
                ConversionKind::KgToG,
                ConversionKind::PenceToPounds,
            ],
            max_value: 500,
        },
        _ => Params {
            conversions: vec![
                ConversionKind::CmToM,
                ConversionKind::MToCm,
                ConversionKind::MmToCm,
                ConversionKind::CmToMm,
                ConversionKind::GToKg,
                ConversionKind::KgToG,
                ConversionKind::MlToL,
                ConversionKind::LToMl,
                ConversionKind::PenceToPounds,
                ConversionKind::PoundsToPence,
            ],
            max_value: 1000,
        },
    }
}

/// Convert an integer quantity between metric (or currency) units.
pub fn generate(params: &Params, sampler: &mut ValueSampler) -> QuestionOutput {
    let kind = sampler
        .pick(&params.conversions)
        .copied()
        .unwrap_or(ConversionKind::MToCm);
    let value = sampler.int_in(1, params.max_value.max(1));

    let factor = kind.factor();
    let dp = kind.result_decimal_places();
    let result = round_dp(value as f64 * factor, dp.max(3));
    let (from_unit, to_unit) = kind.units();

    QuestionOutput::plain(
        Operation::UnitConversion,
        vec![value as f64, factor],
        result,
        dp,
        QuestionDetail::Conversion {
            from_unit: from_unit.to_string(),
            to_unit: to_unit.to_string(),
            factor,
        },
    )
}
