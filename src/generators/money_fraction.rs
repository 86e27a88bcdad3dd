use serde::{Deserialize, Serialize};

use crate::generators::currency::format_pence;
use crate::generators::types::{FormattedView, Operation, QuestionDetail, QuestionOutput};
use crate::sampler::ValueSampler;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub denominators: Vec<i64>,
    /// Amount ceiling in pence.
    pub max_amount: i64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            denominators: vec![2, 4],
            max_amount: 200,
        }
    }
}

pub fn default_params(year: u8) -> Params {
    match year.clamp(1, 6) {
        1 | 2 => Params {
            denominators: vec![2],
            max_amount: 40,
        },
        3 => Params {
            denominators: vec![2, 4],
            max_amount: 100,
        },
        4 => Params {
            denominators: vec![2, 3, 4],
            max_amount: 240,
        },
        5 => Params {
            denominators: vec![2, 3, 4, 5, 10],
            max_amount: 500,
        },
        _ => Params {
            denominators: vec![2, 3, 4, 5, 10],
            max_amount: 1000,
        },
    }
}

/// Fraction of a money amount; the amount is a multiple of the denominator
/// so the answer is an exact number of pence.
pub fn generate(params: &Params, sampler: &mut ValueSampler) -> QuestionOutput {
    let denominator = sampler
        .pick(&params.denominators)
        .copied()
        .unwrap_or(2)
        .max(2);
    let numerator = sampler.int_in(1, denominator - 1);

    let max_multiples = (params.max_amount.max(denominator) / denominator).max(1);
    let amount = denominator * sampler.int_in(1, max_multiples);
    let result = amount * numerator / denominator;

    QuestionOutput {
        operation: Operation::MoneyFraction,
        operands: vec![amount as f64, numerator as f64, denominator as f64],
        result: result as f64,
        formatted: FormattedView {
            operands: vec![
                format_pence(amount),
                numerator.to_string(),
                denominator.to_string(),
            ],
            result: format_pence(result),
        },
        detail: QuestionDetail::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_are_whole_pence() {
        let mut sampler = ValueSampler::seeded(95);
        for year in 1..=6 {
            let params = default_params(year);
            for _ in 0..100 {
                let out = generate(&params, &mut sampler);
                let amount = out.operands[0] as i64;
                let numerator = out.operands[1] as i64;
                let denominator = out.operands[2] as i64;
                assert_eq!(amount % denominator, 0);
                assert_eq!(out.result as i64, amount * numerator / denominator);
            }
        }
    }
}
