use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::UNIQUE_SET_RETRY_LIMIT;
use crate::generators::types::{Operation, QuestionDetail, QuestionOutput, ValueConstraints};
use crate::sampler::ValueSampler;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub operand_count: usize,
    pub max_value: f64,
    pub decimal_places: u8,
    pub value_constraints: ValueConstraints,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            operand_count: 2,
            max_value: 100.0,
            decimal_places: 0,
            value_constraints: ValueConstraints::default(),
        }
    }
}

pub fn default_params(year: u8) -> Params {
    match year.clamp(1, 6) {
        1 => Params {
            max_value: 10.0,
            ..Params::default()
        },
        2 => Params {
            max_value: 20.0,
            ..Params::default()
        },
        3 => Params {
            max_value: 100.0,
            ..Params::default()
        },
        4 => Params {
            operand_count: 3,
            max_value: 1000.0,
            ..Params::default()
        },
        5 => Params {
            operand_count: 3,
            max_value: 100.0,
            decimal_places: 1,
            value_constraints: ValueConstraints { min: 0.1, step: 0.1 },
            ..Params::default()
        },
        _ => Params {
            operand_count: 4,
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

/// Which of these values is the largest? Operands are kept distinct by
/// bounded re-draws; on exhaustion duplicates are accepted.
pub fn generate(params: &Params, sampler: &mut ValueSampler) -> QuestionOutput {
    let count = params.operand_count.clamp(2, 5);
    let dp = params.decimal_places.min(3);
    let min = params.value_constraints.min.max(0.0);
    let step = params.value_constraints.step;
    let max_value = params.max_value.max(min);

    let mut operands: Vec<f64> = Vec::with_capacity(count);
    let mut attempts = 0;
    while operands.len() < count {
        let candidate = sampler.next_value(max_value, dp, min, step);
        attempts += 1;
        if !operands.contains(&candidate) {
            operands.push(candidate);
        } else if attempts >= UNIQUE_SET_RETRY_LIMIT {
            warn!(attempts, "distinct-value constraint relaxed after retry limit");
            operands.push(candidate);
        }
    }

    let result = operands.iter().copied().fold(f64::MIN, f64::max);
    QuestionOutput::plain(Operation::Comparison, operands, result, dp, QuestionDetail::None)
}
