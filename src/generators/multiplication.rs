use serde::{Deserialize, Serialize};

use crate::generators::types::{Operation, QuestionDetail, QuestionOutput};
use crate::sampler::{round_dp, ValueSampler};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Times tables the first factor is drawn from.
    pub tables: Vec<i64>,
    pub max_multiplier: i64,
    pub decimal_places: u8,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            tables: vec![2, 3, 4, 5, 10],
            max_multiplier: 10,
            decimal_places: 0,
        }
    }
}

pub fn default_params(year: u8) -> Params {
    match year.clamp(1, 6) {
        1 => Params {
            tables: vec![2, 5, 10],
            max_multiplier: 5,
            ..Params::default()
        },
        2 => Params {
            tables: vec![2, 5, 10],
            max_multiplier: 10,
            ..Params::default()
        },
        3 => Params {
            tables: vec![2, 3, 4, 5, 8, 10],
            max_multiplier: 10,
            ..Params::default()
        },
        4 => Params {
            tables: (2..=12).collect(),
            max_multiplier: 12,
            ..Params::default()
        },
        5 => Params {
            tables: (2..=12).collect(),
            max_multiplier: 100,
            ..Params::default()
        },
        _ => Params {
            tables: (2..=12).collect(),
            max_multiplier: 1000,
            ..Params::default()
        },
    }
}

pub fn generate(params: &Params, sampler: &mut ValueSampler) -> QuestionOutput {
    let dp = params.decimal_places.min(3);
    let table = sampler.pick(&params.tables).copied().unwrap_or(2).max(1);
    let multiplier = sampler.int_in(1, params.max_multiplier.max(1));

    let operands = vec![table as f64, multiplier as f64];
    let result = round_dp((table * multiplier) as f64, dp);
    QuestionOutput::plain(
        Operation::Multiplication,
        operands,
        result,
        dp,
        QuestionDetail::None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_matches_operands() {
        let mut sampler = ValueSampler::seeded(4);
        let params = default_params(3);
        for _ in 0..100 {
            let out = generate(&params, &mut sampler);
            assert_eq!(out.result, out.operands[0] * out.operands[1]);
            assert!(params.tables.contains(&(out.operands[0] as i64)));
        }
    }

    #[test]
    fn empty_table_set_falls_back() {
        let mut sampler = ValueSampler::seeded(8);
        let params = Params {
            tables: vec![],
            ..Params::default()
        };
        let out = generate(&params, &mut sampler);
        assert_eq!(out.operands[0], 2.0);
    }
}
