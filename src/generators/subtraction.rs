use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::SAMPLE_RETRY_LIMIT;
use crate::generators::digits::subtraction_borrows;
use crate::generators::types::{Operation, QuestionDetail, QuestionOutput, ValueConstraints};
use crate::sampler::{round_dp, ValueSampler};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub max_value: f64,
    pub decimal_places: u8,
    pub allow_borrowing: bool,
    /// Swap operands whenever the sampled subtrahend exceeds the minuend.
    pub ensure_positive: bool,
    pub value_constraints: ValueConstraints,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            max_value: 20.0,
            decimal_places: 0,
            allow_borrowing: true,
            ensure_positive: true,
            value_constraints: ValueConstraints::default(),
        }
    }
}

pub fn default_params(year: u8) -> Params {
    match year.clamp(1, 6) {
        1 => Params {
            max_value: 10.0,
            allow_borrowing: false,
            ..Params::default()
        },
        2 => Params {
            max_value: 20.0,
            allow_borrowing: false,
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

pub fn generate(params: &Params, sampler: &mut ValueSampler) -> QuestionOutput {
    let dp = params.decimal_places.min(3);
    let min = params.value_constraints.min.max(0.0);
    let step = params.value_constraints.step;
    let max_value = params.max_value.max(min);

    let (mut minuend, mut subtrahend) = sample_pair(sampler, params, max_value, dp, min, step);
    if !params.allow_borrowing {
        let mut satisfied = !subtraction_borrows(minuend, subtrahend, dp);
        let mut attempts = 1;
        while !satisfied && attempts < SAMPLE_RETRY_LIMIT {
            let pair = sample_pair(sampler, params, max_value, dp, min, step);
            minuend = pair.0;
            subtrahend = pair.1;
            satisfied = !subtraction_borrows(minuend, subtrahend, dp);
            attempts += 1;
        }
        if !satisfied {
            warn!(
                attempts,
                max_value, "no-borrow constraint relaxed after retry limit"
            );
        }
    }

    let result = round_dp(minuend - subtrahend, dp);
    QuestionOutput::plain(
        Operation::Subtraction,
        vec![minuend, subtrahend],
        result,
        dp,
        QuestionDetail::None,
    )
}

fn sample_pair(
    sampler: &mut ValueSampler,
    params: &Params,
    max_value: f64,
    dp: u8,
    min: f64,
    step: f64,
) -> (f64, f64) {
    let a = sampler.next_value(max_value, dp, min, step);
    let b = sampler.next_value(max_value, dp, min, step);
    if params.ensure_positive && b > a {
        (b, a)
    } else {
        (a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_is_non_negative_when_positive_enforced() {
        let mut sampler = ValueSampler::seeded(9);
        let params = default_params(3);
        for _ in 0..200 {
            let out = generate(&params, &mut sampler);
            assert!(out.result >= 0.0);
            assert_eq!(out.result, round_dp(out.operands[0] - out.operands[1], 0));
        }
    }

    #[test]
    fn no_borrow_holds_for_year_two_defaults() {
        let mut sampler = ValueSampler::seeded(13);
        let params = default_params(2);
        for _ in 0..200 {
            let out = generate(&params, &mut sampler);
            assert!(!subtraction_borrows(out.operands[0], out.operands[1], 0));
        }
    }

    #[test]
    fn negative_results_allowed_when_flag_off() {
        let mut sampler = ValueSampler::seeded(77);
        let params = Params {
            ensure_positive: false,
            ..Params::default()
        };
        let mut saw_negative = false;
        for _ in 0..300 {
            let out = generate(&params, &mut sampler);
            if out.result < 0.0 {
                saw_negative = true;
                break;
            }
        }
        assert!(saw_negative, "expected at least one negative difference");
    }
}
