use serde::{Deserialize, Serialize};

use crate::generators::currency::format_pence;
use crate::sampler::round_dp;

/// Operation tag on every generated question. Re-applying the tagged
/// operation to the stated operands reproduces `result` within 3-decimal
/// rounding tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Percentage,
    FractionOf,
    CoinCounting,
    TimeRate,
    UnitConversion,
    Comparison,
    UnitRate,
    CoinRecognition,
    ChangeCalculation,
    MoneyCombinations,
    MixedMoney,
    MoneyFraction,
    MoneyScaling,
    ShapeRecognition,
    Area,
    Perimeter,
    Position,
    LinearPattern,
    MultiStep,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Addition => "addition",
            Self::Subtraction => "subtraction",
            Self::Multiplication => "multiplication",
            Self::Division => "division",
            Self::Percentage => "percentage",
            Self::FractionOf => "fraction_of",
            Self::CoinCounting => "coin_counting",
            Self::TimeRate => "time_rate",
            Self::UnitConversion => "unit_conversion",
            Self::Comparison => "comparison",
            Self::UnitRate => "unit_rate",
            Self::CoinRecognition => "coin_recognition",
            Self::ChangeCalculation => "change_calculation",
            Self::MoneyCombinations => "money_combinations",
            Self::MixedMoney => "mixed_money",
            Self::MoneyFraction => "money_fraction",
            Self::MoneyScaling => "money_scaling",
            Self::ShapeRecognition => "shape_recognition",
            Self::Area => "area",
            Self::Perimeter => "perimeter",
            Self::Position => "position",
            Self::LinearPattern => "linear_pattern",
            Self::MultiStep => "multi_step",
        }
    }
}

/// Lower bound and grid step for sampled operand values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueConstraints {
    pub min: f64,
    pub step: f64,
}

impl Default for ValueConstraints {
    fn default() -> Self {
        Self { min: 1.0, step: 1.0 }
    }
}

/// Inclusive integer range, used for target amounts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

impl Default for IntRange {
    fn default() -> Self {
        Self { min: 1, max: 20 }
    }
}

/// A (denomination, count) group inside a coin decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinGroup {
    pub denomination: u32,
    pub count: u32,
}

/// One executed step of a multi-step question.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepOutput {
    pub operation: Operation,
    pub operands: Vec<f64>,
    pub result: f64,
    /// True when the first operand was carried over from the previous step.
    pub chained: bool,
}

/// Generator-specific payload. A closed set so downstream consumers never
/// inspect per-generator shapes structurally.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum QuestionDetail {
    None,
    Coins {
        coins: Vec<CoinGroup>,
        total_coins: u32,
    },
    Combinations {
        combinations: Vec<Vec<CoinGroup>>,
    },
    Coin {
        name: String,
    },
    Triangle {
        sides: [f64; 3],
        unit: String,
    },
    Rectangle {
        width: f64,
        height: f64,
        unit: String,
    },
    Shape {
        name: String,
        sides: u32,
    },
    Conversion {
        from_unit: String,
        to_unit: String,
        factor: f64,
    },
    Position {
        direction: String,
        grid_size: u32,
    },
    Sequence {
        slope: f64,
        intercept: f64,
        equation: String,
    },
    Steps {
        steps: Vec<StepOutput>,
    },
}

/// Fixed-decimal / currency string views of the operands and result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedView {
    pub operands: Vec<String>,
    pub result: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOutput {
    pub operation: Operation,
    pub operands: Vec<f64>,
    pub result: f64,
    pub formatted: FormattedView,
    pub detail: QuestionDetail,
}

impl QuestionOutput {
    /// Plain numeric output with fixed decimal places.
    pub fn plain(
        operation: Operation,
        operands: Vec<f64>,
        result: f64,
        decimal_places: u8,
        detail: QuestionDetail,
    ) -> Self {
        let formatted = FormattedView {
            operands: operands
                .iter()
                .map(|v| format_decimal(*v, decimal_places))
                .collect(),
            result: format_decimal(result, decimal_places),
        };
        Self {
            operation,
            operands,
            result: round_dp(result, 3),
            formatted,
            detail,
        }
    }

    /// Money output; operands and result are pence, formatted as "42p" /
    /// "£1.20".
    pub fn money(
        operation: Operation,
        operand_pence: Vec<i64>,
        result_pence: i64,
        detail: QuestionDetail,
    ) -> Self {
        let formatted = FormattedView {
            operands: operand_pence.iter().map(|p| format_pence(*p)).collect(),
            result: format_pence(result_pence),
        };
        Self {
            operation,
            operands: operand_pence.iter().map(|p| *p as f64).collect(),
            result: result_pence as f64,
            formatted,
            detail,
        }
    }
}

pub fn format_decimal(value: f64, decimal_places: u8) -> String {
    format!("{:.*}", decimal_places as usize, value)
}
