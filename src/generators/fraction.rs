use serde::{Deserialize, Serialize};

use crate::generators::types::{Operation, QuestionDetail, QuestionOutput};
use crate::sampler::ValueSampler;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Denominators the fraction may use.
    pub denominators: Vec<i64>,
    pub max_whole: i64,
    /// Restrict numerators to proper fractions (numerator < denominator).
    pub proper_only: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            denominators: vec![2, 4],
            max_whole: 20,
            proper_only: true,
        }
    }
}

pub fn default_params(year: u8) -> Params {
    match year.clamp(1, 6) {
        1 => Params {
            denominators: vec![2],
            max_whole: 10,
            ..Params::default()
        },
        2 => Params {
            denominators: vec![2, 4],
            max_whole: 20,
            ..Params::default()
        },
        3 => Params {
            denominators: vec![2, 3, 4],
            max_whole: 30,
            ..Params::default()
        },
        4 => Params {
            denominators: vec![2, 3, 4, 5, 8, 10],
            max_whole: 60,
            ..Params::default()
        },
        5 => Params {
            denominators: vec![2, 3, 4, 5, 6, 8, 10],
            max_whole: 100,
            ..Params::default()
        },
        _ => Params {
            denominators: vec![2, 3, 4, 5, 6, 8, 10, 12],
            max_whole: 144,
            ..Params::default()
        },
    }
}

/// "numerator/denominator of whole" with the whole chosen as a multiple of
/// the denominator so the answer is always exact.
pub fn generate(params: &Params, sampler: &mut ValueSampler) -> QuestionOutput {
    let denominator = sampler
        .pick(&params.denominators)
        .copied()
        .unwrap_or(2)
        .max(2);
    let numerator = if params.proper_only {
        sampler.int_in(1, denominator - 1)
    } else {
        sampler.int_in(1, denominator)
    };

    let max_multiples = (params.max_whole.max(denominator) / denominator).max(1);
    let whole = denominator * sampler.int_in(1, max_multiples);
    let result = whole * numerator / denominator;

    QuestionOutput::plain(
        Operation::FractionOf,
        vec![whole as f64, numerator as f64, denominator as f64],
        result as f64,
        0,
        QuestionDetail::None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_are_exact() {
        let mut sampler = ValueSampler::seeded(40);
        for year in 1..=6 {
            let params = default_params(year);
            for _ in 0..100 {
                let out = generate(&params, &mut sampler);
                let whole = out.operands[0] as i64;
                let numerator = out.operands[1] as i64;
                let denominator = out.operands[2] as i64;
                assert_eq!(whole % denominator, 0);
                assert_eq!(out.result as i64, whole * numerator / denominator);
                assert!(numerator < denominator);
            }
        }
    }

    #[test]
    fn empty_denominator_set_falls_back_to_halves() {
        let mut sampler = ValueSampler::seeded(41);
        let params = Params {
            denominators: vec![],
            ..Params::default()
        };
        let out = generate(&params, &mut sampler);
        assert_eq!(out.operands[2], 2.0);
    }
}
