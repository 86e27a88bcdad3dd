use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::SAMPLE_RETRY_LIMIT;
use crate::generators::digits::addition_carries;
use crate::generators::types::{Operation, QuestionDetail, QuestionOutput, ValueConstraints};
use crate::sampler::{round_dp, ValueSampler};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub operand_count: usize,
    /// Upper bound on the operand *sum*.
    pub max_value: f64,
    pub decimal_places: u8,
    pub allow_carrying: bool,
    pub value_constraints: ValueConstraints,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            operand_count: 2,
            max_value: 20.0,
            decimal_places: 0,
            allow_carrying: true,
            value_constraints: ValueConstraints::default(),
        }
    }
}

pub fn default_params(year: u8) -> Params {
    match year.clamp(1, 6) {
        1 => Params {
            max_value: 10.0,
            allow_carrying: false,
            ..Params::default()
        },
        2 => Params {
            max_value: 20.0,
            allow_carrying: false,
            ..Params::default()
        },
        3 => Params {
            max_value: 100.0,
            ..Params::default()
        },
        4 => Params {
            max_value: 1000.0,
            ..Params::default()
        },
        5 => Params {
            max_value: 100.0,
            decimal_places: 1,
            value_constraints: ValueConstraints { min: 0.1, step: 0.1 },
            ..Params::default()
        },
        _ => Params {
            max_value: 100.0,
            decimal_places: 2,
            value_constraints: ValueConstraints {
                min: 0.01,
                step: 0.01,
            },
            ..Params::default()
        },
    }
}

/// Samples operands whose sum stays within `max_value`, re-drawing up to the
/// retry limit when carrying is disallowed. On exhaustion the last operand
/// set is returned with the carry constraint relaxed.
pub fn generate(params: &Params, sampler: &mut ValueSampler) -> QuestionOutput {
    let count = params.operand_count.clamp(2, 5);
    let dp = params.decimal_places.min(3);
    let min = params.value_constraints.min.max(0.0);
    let step = params.value_constraints.step;
    let max_value = params.max_value.max(min * count as f64);

    let mut operands = sample_operands(sampler, count, max_value, dp, min, step);
    if !params.allow_carrying {
        let mut satisfied = !addition_carries(&operands, dp);
        let mut attempts = 1;
        while !satisfied && attempts < SAMPLE_RETRY_LIMIT {
            operands = sample_operands(sampler, count, max_value, dp, min, step);
            satisfied = !addition_carries(&operands, dp);
            attempts += 1;
        }
        if !satisfied {
            warn!(
                attempts,
                max_value, "no-carry constraint relaxed after retry limit"
            );
        }
    }

    let result = round_dp(operands.iter().sum(), dp);
    QuestionOutput::plain(Operation::Addition, operands, result, dp, QuestionDetail::None)
}

/// Sequential budgeted sampling keeps the running sum within `max_value` by
/// construction; every later operand is still guaranteed at least `min`.
fn sample_operands(
    sampler: &mut ValueSampler,
    count: usize,
    max_value: f64,
    dp: u8,
    min: f64,
    step: f64,
) -> Vec<f64> {
    let mut operands = Vec::with_capacity(count);
    let mut budget = max_value;
    for position in 0..count {
        let reserved = (count - position - 1) as f64 * min;
        let upper = (budget - reserved).max(min);
        let value = sampler.next_value(upper, dp, min, step);
        budget -= value;
        operands.push(value);
    }
    operands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_stays_within_max_value() {
        let mut sampler = ValueSampler::seeded(5);
        let params = default_params(2);
        for _ in 0..200 {
            let out = generate(&params, &mut sampler);
            let sum: f64 = out.operands.iter().sum();
            assert!(sum <= params.max_value + 1e-9, "sum {sum} exceeds bound");
            assert_eq!(out.result, round_dp(sum, 0));
        }
    }

    #[test]
    fn no_carry_holds_for_year_one_defaults() {
        let mut sampler = ValueSampler::seeded(17);
        let params = default_params(1);
        for _ in 0..200 {
            let out = generate(&params, &mut sampler);
            // Bound of 10 makes the constraint satisfiable, so the retry
            // loop always lands on a carry-free pair.
            assert!(!addition_carries(&out.operands, 0));
        }
    }

    #[test]
    fn operand_count_is_clamped() {
        let mut sampler = ValueSampler::seeded(23);
        let params = Params {
            operand_count: 99,
            ..Params::default()
        };
        let out = generate(&params, &mut sampler);
        assert_eq!(out.operands.len(), 5);
    }

    #[test]
    fn decimal_operands_respect_grid() {
        let mut sampler = ValueSampler::seeded(31);
        let params = default_params(5);
        let out = generate(&params, &mut sampler);
        for operand in &out.operands {
            let scaled = operand * 10.0;
            assert!((scaled - scaled.round()).abs() < 1e-9);
        }
    }
}
