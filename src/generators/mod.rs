//! Difficulty-parameterized question generators and their dispatch table.
//!
//! Each skill lives in its own module exposing the shared contract:
//! a `Params` struct, `default_params(year)` (total, year-clamping) and
//! `generate(&Params, &mut ValueSampler)` (infallible given valid params —
//! out-of-range fields are clamped, unsatisfiable constraints degrade to
//! documented fallbacks). Dispatch is a match over [`ModelId`]; generators
//! share no state, only the contract.

pub mod addition;
pub mod change;
pub mod coin_recognition;
pub mod comparison;
pub mod conversion;
pub mod counting;
pub mod currency;
pub mod digits;
pub mod division;
pub mod fraction;
pub mod measurement;
pub mod mixed_money;
pub mod money_combinations;
pub mod money_fraction;
pub mod money_scaling;
pub mod multi_step;
pub mod multiplication;
pub mod patterns;
pub mod percentage;
pub mod position;
pub mod shapes;
pub mod subtraction;
pub mod time_rate;
pub mod types;
pub mod unit_rate;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::sampler::ValueSampler;

pub use types::{
    CoinGroup, FormattedView, IntRange, Operation, QuestionDetail, QuestionOutput, StepOutput,
    ValueConstraints,
};

/// Registered generator identifiers. The string forms are the external
/// model ids accepted by the engine facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModelId {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Percentage,
    Fraction,
    Counting,
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
    AreaPerimeter,
    PositionDirection,
    LinearPattern,
    MultiStep,
}

impl ModelId {
    pub const ALL: [ModelId; 22] = [
        Self::Addition,
        Self::Subtraction,
        Self::Multiplication,
        Self::Division,
        Self::Percentage,
        Self::Fraction,
        Self::Counting,
        Self::TimeRate,
        Self::UnitConversion,
        Self::Comparison,
        Self::UnitRate,
        Self::CoinRecognition,
        Self::ChangeCalculation,
        Self::MoneyCombinations,
        Self::MixedMoney,
        Self::MoneyFraction,
        Self::MoneyScaling,
        Self::ShapeRecognition,
        Self::AreaPerimeter,
        Self::PositionDirection,
        Self::LinearPattern,
        Self::MultiStep,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Addition => "ADDITION",
            Self::Subtraction => "SUBTRACTION",
            Self::Multiplication => "MULTIPLICATION",
            Self::Division => "DIVISION",
            Self::Percentage => "PERCENTAGE",
            Self::Fraction => "FRACTION",
            Self::Counting => "COUNTING",
            Self::TimeRate => "TIME_RATE",
            Self::UnitConversion => "UNIT_CONVERSION",
            Self::Comparison => "COMPARISON",
            Self::UnitRate => "UNIT_RATE",
            Self::CoinRecognition => "COIN_RECOGNITION",
            Self::ChangeCalculation => "CHANGE_CALCULATION",
            Self::MoneyCombinations => "MONEY_COMBINATIONS",
            Self::MixedMoney => "MIXED_MONEY",
            Self::MoneyFraction => "MONEY_FRACTION",
            Self::MoneyScaling => "MONEY_SCALING",
            Self::ShapeRecognition => "SHAPE_RECOGNITION",
            Self::AreaPerimeter => "AREA_PERIMETER",
            Self::PositionDirection => "POSITION_DIRECTION",
            Self::LinearPattern => "LINEAR_PATTERN",
            Self::MultiStep => "MULTI_STEP",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let upper = s.trim().to_uppercase();
        Self::ALL.iter().copied().find(|m| m.as_str() == upper)
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("invalid parameters for {model}: {source}")]
    InvalidParams {
        model: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Year-keyed default parameters, serialized for the uniform dispatch shape.
pub fn default_params(model: ModelId, year: u8) -> Value {
    match model {
        ModelId::Addition => to_value(addition::default_params(year)),
        ModelId::Subtraction => to_value(subtraction::default_params(year)),
        ModelId::Multiplication => to_value(multiplication::default_params(year)),
        ModelId::Division => to_value(division::default_params(year)),
        ModelId::Percentage => to_value(percentage::default_params(year)),
        ModelId::Fraction => to_value(fraction::default_params(year)),
        ModelId::Counting => to_value(counting::default_params(year)),
        ModelId::TimeRate => to_value(time_rate::default_params(year)),
        ModelId::UnitConversion => to_value(conversion::default_params(year)),
        ModelId::Comparison => to_value(comparison::default_params(year)),
        ModelId::UnitRate => to_value(unit_rate::default_params(year)),
        ModelId::CoinRecognition => to_value(coin_recognition::default_params(year)),
        ModelId::ChangeCalculation => to_value(change::default_params(year)),
        ModelId::MoneyCombinations => to_value(money_combinations::default_params(year)),
        ModelId::MixedMoney => to_value(mixed_money::default_params(year)),
        ModelId::MoneyFraction => to_value(money_fraction::default_params(year)),
        ModelId::MoneyScaling => to_value(money_scaling::default_params(year)),
        ModelId::ShapeRecognition => to_value(shapes::default_params(year)),
        ModelId::AreaPerimeter => to_value(measurement::default_params(year)),
        ModelId::PositionDirection => to_value(position::default_params(year)),
        ModelId::LinearPattern => to_value(patterns::default_params(year)),
        ModelId::MultiStep => to_value(multi_step::default_params(year)),
    }
}

/// Dispatches a generation call. Caller-supplied parameter objects are
/// deserialized into the generator's typed `Params`; missing fields take
/// their defaults, a structurally wrong value is an error.
pub fn generate(
    model: ModelId,
    params: &Value,
    sampler: &mut ValueSampler,
) -> Result<QuestionOutput, GenerateError> {
    match model {
        ModelId::Addition => typed::<addition::Params>(model, params)
            .map(|p| addition::generate(&p, sampler)),
        ModelId::Subtraction => typed::<subtraction::Params>(model, params)
            .map(|p| subtraction::generate(&p, sampler)),
        ModelId::Multiplication => typed::<multiplication::Params>(model, params)
            .map(|p| multiplication::generate(&p, sampler)),
        ModelId::Division => typed::<division::Params>(model, params)
            .map(|p| division::generate(&p, sampler)),
        ModelId::Percentage => typed::<percentage::Params>(model, params)
            .map(|p| percentage::generate(&p, sampler)),
        ModelId::Fraction => typed::<fraction::Params>(model, params)
            .map(|p| fraction::generate(&p, sampler)),
        ModelId::Counting => typed::<counting::Params>(model, params)
            .map(|p| counting::generate(&p, sampler)),
        ModelId::TimeRate => typed::<time_rate::Params>(model, params)
            .map(|p| time_rate::generate(&p, sampler)),
        ModelId::UnitConversion => typed::<conversion::Params>(model, params)
            .map(|p| conversion::generate(&p, sampler)),
        ModelId::Comparison => typed::<comparison::Params>(model, params)
            .map(|p| comparison::generate(&p, sampler)),
        ModelId::UnitRate => typed::<unit_rate::Params>(model, params)
            .map(|p| unit_rate::generate(&p, sampler)),
        ModelId::CoinRecognition => typed::<coin_recognition::Params>(model, params)
            .map(|p| coin_recognition::generate(&p, sampler)),
        ModelId::ChangeCalculation => typed::<change::Params>(model, params)
            .map(|p| change::generate(&p, sampler)),
        ModelId::MoneyCombinations => typed::<money_combinations::Params>(model, params)
            .map(|p| money_combinations::generate(&p, sampler)),
        ModelId::MixedMoney => typed::<mixed_money::Params>(model, params)
            .map(|p| mixed_money::generate(&p, sampler)),
        ModelId::MoneyFraction => typed::<money_fraction::Params>(model, params)
            .map(|p| money_fraction::generate(&p, sampler)),
        ModelId::MoneyScaling => typed::<money_scaling::Params>(model, params)
            .map(|p| money_scaling::generate(&p, sampler)),
        ModelId::ShapeRecognition => typed::<shapes::Params>(model, params)
            .map(|p| shapes::generate(&p, sampler)),
        ModelId::AreaPerimeter => typed::<measurement::Params>(model, params)
            .map(|p| measurement::generate(&p, sampler)),
        ModelId::PositionDirection => typed::<position::Params>(model, params)
            .map(|p| position::generate(&p, sampler)),
        ModelId::LinearPattern => typed::<patterns::Params>(model, params)
            .map(|p| patterns::generate(&p, sampler)),
        ModelId::MultiStep => typed::<multi_step::Params>(model, params)
            .map(|p| multi_step::generate(&p, sampler)),
    }
}

fn to_value<T: Serialize>(params: T) -> Value {
    serde_json::to_value(params).unwrap_or(Value::Null)
}

fn typed<T: DeserializeOwned>(model: ModelId, value: &Value) -> Result<T, GenerateError> {
    serde_json::from_value(value.clone()).map_err(|source| GenerateError::InvalidParams {
        model: model.as_str(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_ids_round_trip_through_strings() {
        for model in ModelId::ALL {
            assert_eq!(ModelId::parse(model.as_str()), Some(model));
        }
        assert_eq!(ModelId::parse("addition"), Some(ModelId::Addition));
        assert_eq!(ModelId::parse("NOT_A_MODEL"), None);
    }

    #[test]
    fn every_model_generates_from_defaults_for_every_year() {
        let mut sampler = ValueSampler::seeded(1);
        for model in ModelId::ALL {
            for year in 1..=6 {
                let params = default_params(model, year);
                let output = generate(model, &params, &mut sampler)
                    .unwrap_or_else(|e| panic!("{model} year {year} failed: {e}"));
                assert!(output.result.is_finite());
            }
        }
    }

    #[test]
    fn partial_params_fall_back_to_defaults() {
        let mut sampler = ValueSampler::seeded(2);
        let params = serde_json::json!({ "max_value": 12.0 });
        let output = generate(ModelId::Addition, &params, &mut sampler).unwrap();
        let sum: f64 = output.operands.iter().sum();
        assert!(sum <= 12.0);
    }

    #[test]
    fn structurally_wrong_params_are_rejected() {
        let mut sampler = ValueSampler::seeded(3);
        let params = serde_json::json!({ "max_value": "not a number" });
        assert!(generate(ModelId::Addition, &params, &mut sampler).is_err());
    }
}
