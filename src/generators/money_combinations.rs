use serde::{Deserialize, Serialize};

use crate::config::COMBINATION_LIMIT;
use crate::generators::currency::enumerate_combinations;
use crate::generators::types::{IntRange, Operation, QuestionDetail, QuestionOutput};
use crate::sampler::ValueSampler;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub target_amount_range: IntRange,
    pub available_denominations: Vec<u32>,
    pub max_combinations: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            target_amount_range: IntRange { min: 5, max: 20 },
            available_denominations: vec![1, 2, 5, 10, 20],
            max_combinations: COMBINATION_LIMIT,
        }
    }
}

pub fn default_params(year: u8) -> Params {
    match year.clamp(1, 6) {
        1 => Params {
            target_amount_range: IntRange { min: 2, max: 10 },
            available_denominations: vec![1, 2, 5],
            ..Params::default()
        },
        2 => Params {
            target_amount_range: IntRange { min: 5, max: 20 },
            available_denominations: vec![1, 2, 5, 10],
            ..Params::default()
        },
        3 => Params {
            target_amount_range: IntRange { min: 10, max: 50 },
            available_denominations: vec![1, 2, 5, 10, 20],
            ..Params::default()
        },
        _ => Params {
            target_amount_range: IntRange { min: 20, max: 100 },
            available_denominations: vec![1, 2, 5, 10, 20, 50],
            ..Params::default()
        },
    }
}

/// Every way (up to the cap) of forming the target amount from the available
/// denominations, found by bounded depth-first search over descending
/// denominations.
pub fn generate(params: &Params, sampler: &mut ValueSampler) -> QuestionOutput {
    let target = sampler.int_in(
        params.target_amount_range.min.max(1),
        params.target_amount_range.max.max(1),
    ) as u32;

    let cap = params.max_combinations.clamp(1, COMBINATION_LIMIT);
    let combinations = enumerate_combinations(target, &params.available_denominations, cap);

    QuestionOutput::money(
        Operation::MoneyCombinations,
        vec![target as i64],
        target as i64,
        QuestionDetail::Combinations { combinations },
    )
}
