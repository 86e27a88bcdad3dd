use serde::{Deserialize, Serialize};

use crate::generators::types::{Operation, QuestionDetail, QuestionOutput};
use crate::sampler::{round_dp, ValueSampler};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub max_divisor: i64,
    pub max_quotient: i64,
    /// Construct the dividend as divisor × multiplier so the quotient is exact.
    pub ensure_whole: bool,
    /// Only consulted when `ensure_whole` is off; a false value floors the
    /// dividend to the nearest multiple of the divisor.
    pub allow_remainder: bool,
    pub decimal_places: u8,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            max_divisor: 10,
            max_quotient: 10,
            ensure_whole: true,
            allow_remainder: false,
            decimal_places: 0,
        }
    }
}

pub fn default_params(year: u8) -> Params {
    match year.clamp(1, 6) {
        1 => Params {
            max_divisor: 2,
            max_quotient: 5,
            ..Params::default()
        },
        2 => Params {
            max_divisor: 5,
            max_quotient: 10,
            ..Params::default()
        },
        3 => Params {
            max_divisor: 10,
            max_quotient: 10,
            ..Params::default()
        },
        4 => Params {
            max_divisor: 12,
            max_quotient: 12,
            ..Params::default()
        },
        5 => Params {
            max_divisor: 12,
            max_quotient: 100,
            ..Params::default()
        },
        _ => Params {
            max_divisor: 12,
            max_quotient: 100,
            ensure_whole: false,
            allow_remainder: false,
            decimal_places: 2,
            ..Params::default()
        },
    }
}

pub fn generate(params: &Params, sampler: &mut ValueSampler) -> QuestionOutput {
    let dp = params.decimal_places.min(3);
    let max_divisor = params.max_divisor.max(2);
    let max_quotient = params.max_quotient.max(1);

    let divisor = sampler.int_in(2, max_divisor);
    let dividend = if params.ensure_whole {
        let multiplier = sampler.int_in(1, max_quotient);
        divisor * multiplier
    } else {
        let mut dividend = sampler.int_in(divisor, divisor * max_quotient);
        if !params.allow_remainder {
            dividend -= dividend % divisor;
            if dividend == 0 {
                dividend = divisor;
            }
        }
        dividend
    };

    let result = round_dp(dividend as f64 / divisor as f64, dp);
    QuestionOutput::plain(
        Operation::Division,
        vec![dividend as f64, divisor as f64],
        result,
        dp,
        QuestionDetail::None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_whole_divides_exactly() {
        let mut sampler = ValueSampler::seeded(21);
        let params = default_params(3);
        for _ in 0..200 {
            let out = generate(&params, &mut sampler);
            let dividend = out.operands[0] as i64;
            let divisor = out.operands[1] as i64;
            assert_eq!(dividend % divisor, 0);
            assert_eq!(out.result, (dividend / divisor) as f64);
        }
    }

    #[test]
    fn remainder_free_flooring_when_whole_not_ensured() {
        let mut sampler = ValueSampler::seeded(2);
        let params = Params {
            ensure_whole: false,
            allow_remainder: false,
            ..Params::default()
        };
        for _ in 0..200 {
            let out = generate(&params, &mut sampler);
            let dividend = out.operands[0] as i64;
            let divisor = out.operands[1] as i64;
            assert_eq!(dividend % divisor, 0);
            assert!(dividend >= divisor);
        }
    }

    #[test]
    fn degenerate_divisor_bound_clamps_to_two() {
        let mut sampler = ValueSampler::seeded(6);
        let params = Params {
            max_divisor: 0,
            ..Params::default()
        };
        let out = generate(&params, &mut sampler);
        assert_eq!(out.operands[1], 2.0);
    }
}
