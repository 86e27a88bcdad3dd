use serde::{Deserialize, Serialize};

use crate::generators::currency::format_pence;
use crate::generators::types::{FormattedView, Operation, QuestionDetail, QuestionOutput};
use crate::sampler::ValueSampler;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Unit price ceiling in pence.
    pub max_unit_price: i64,
    pub max_count: i64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            max_unit_price: 50,
            max_count: 5,
        }
    }
}

pub fn default_params(year: u8) -> Params {
    match year.clamp(1, 6) {
        1 | 2 => Params {
            max_unit_price: 10,
            max_count: 3,
        },
        3 => Params {
            max_unit_price: 20,
            max_count: 5,
        },
        4 => Params::default(),
        5 => Params {
            max_unit_price: 100,
            max_count: 8,
        },
        _ => Params {
            max_unit_price: 250,
            max_count: 12,
        },
    }
}

/// Several items at the same price: unit price × count.
pub fn generate(params: &Params, sampler: &mut ValueSampler) -> QuestionOutput {
    let unit_price = sampler.int_in(1, params.max_unit_price.max(1));
    let count = sampler.int_in(2, params.max_count.max(2));
    let total = unit_price * count;

    QuestionOutput {
        operation: Operation::MoneyScaling,
        operands: vec![unit_price as f64, count as f64],
        result: total as f64,
        formatted: FormattedView {
            operands: vec![format_pence(unit_price), count.to_string()],
            result: format_pence(total),
        },
        detail: QuestionDetail::None,
    }
}
