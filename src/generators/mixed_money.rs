use serde::{Deserialize, Serialize};

use crate::generators::types::{Operation, QuestionDetail, QuestionOutput};
use crate::sampler::ValueSampler;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub item_count: usize,
    /// Whole pounds an item may be worth.
    pub max_pounds: i64,
    /// Loose pence an item may be worth.
    pub max_pence: i64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            item_count: 3,
            max_pounds: 5,
            max_pence: 99,
        }
    }
}

pub fn default_params(year: u8) -> Params {
    match year.clamp(1, 6) {
        1 | 2 => Params {
            item_count: 2,
            max_pounds: 2,
            max_pence: 50,
        },
        3 => Params {
            item_count: 2,
            max_pounds: 5,
            max_pence: 99,
        },
        4 => Params::default(),
        5 => Params {
            item_count: 4,
            max_pounds: 10,
            max_pence: 99,
        },
        _ => Params {
            item_count: 4,
            max_pounds: 20,
            max_pence: 99,
        },
    }
}

/// Total a list of amounts mixing whole pounds and loose pence. The first
/// item is always a pound amount and the second always pence so both units
/// appear in every question.
pub fn generate(params: &Params, sampler: &mut ValueSampler) -> QuestionOutput {
    let count = params.item_count.clamp(2, 5);
    let max_pounds = params.max_pounds.max(1);
    let max_pence = params.max_pence.clamp(1, 99);

    let mut items = Vec::with_capacity(count);
    for position in 0..count {
        let pounds_item = match position {
            0 => true,
            1 => false,
            _ => sampler.chance(0.5),
        };
        let pence = if pounds_item {
            sampler.int_in(1, max_pounds) * 100
        } else {
            sampler.int_in(1, max_pence)
        };
        items.push(pence);
    }

    let total: i64 = items.iter().sum();
    QuestionOutput::money(Operation::MixedMoney, items, total, QuestionDetail::None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_are_exact_and_units_mixed() {
        let mut sampler = ValueSampler::seeded(90);
        let params = default_params(4);
        for _ in 0..100 {
            let out = generate(&params, &mut sampler);
            let total: f64 = out.operands.iter().sum();
            assert_eq!(out.result, total);
            assert_eq!(out.operands[0] as i64 % 100, 0, "first item must be pounds");
            assert!(out.operands[1] < 100.0, "second item must be loose pence");
        }
    }
}
