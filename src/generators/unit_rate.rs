use serde::{Deserialize, Serialize};

use crate::generators::currency::format_pence;
use crate::generators::types::{FormattedView, Operation, QuestionDetail, QuestionOutput};
use crate::sampler::ValueSampler;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub max_quantity: i64,
    /// Per-item price ceiling in pence.
    pub max_unit_value: i64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            max_quantity: 10,
            max_unit_value: 20,
        }
    }
}

pub fn default_params(year: u8) -> Params {
    match year.clamp(1, 6) {
        1 | 2 => Params {
            max_quantity: 4,
            max_unit_value: 10,
        },
        3 => Params {
            max_quantity: 5,
            max_unit_value: 20,
        },
        4 => Params::default(),
        5 => Params {
            max_quantity: 12,
            max_unit_value: 50,
        },
        _ => Params {
            max_quantity: 12,
            max_unit_value: 100,
        },
    }
}

/// Price per item from a total: the total is built as quantity × unit price
/// so the rate is always exact.
pub fn generate(params: &Params, sampler: &mut ValueSampler) -> QuestionOutput {
    let quantity = sampler.int_in(2, params.max_quantity.max(2));
    let unit_value = sampler.int_in(1, params.max_unit_value.max(1));
    let total = quantity * unit_value;

    QuestionOutput {
        operation: Operation::UnitRate,
        operands: vec![total as f64, quantity as f64],
        result: unit_value as f64,
        formatted: FormattedView {
            operands: vec![format_pence(total), quantity.to_string()],
            result: format_pence(unit_value),
        },
        detail: QuestionDetail::None,
    }
}
