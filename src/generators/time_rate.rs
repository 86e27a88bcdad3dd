use serde::{Deserialize, Serialize};

use crate::generators::types::{Operation, QuestionDetail, QuestionOutput};
use crate::sampler::ValueSampler;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Amount covered per time unit.
    pub max_rate: i64,
    /// Number of time units.
    pub max_time: i64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            max_rate: 10,
            max_time: 12,
        }
    }
}

pub fn default_params(year: u8) -> Params {
    match year.clamp(1, 6) {
        1 => Params {
            max_rate: 3,
            max_time: 5,
        },
        2 => Params {
            max_rate: 5,
            max_time: 6,
        },
        3 => Params {
            max_rate: 10,
            max_time: 8,
        },
        4 => Params::default(),
        5 => Params {
            max_rate: 20,
            max_time: 12,
        },
        _ => Params {
            max_rate: 60,
            max_time: 24,
        },
    }
}

/// Steady-rate accumulation: rate per unit time × elapsed units.
pub fn generate(params: &Params, sampler: &mut ValueSampler) -> QuestionOutput {
    let rate = sampler.int_in(1, params.max_rate.max(1));
    let time = sampler.int_in(1, params.max_time.max(1));

    QuestionOutput::plain(
        Operation::TimeRate,
        vec![rate as f64, time as f64],
        (rate * time) as f64,
        0,
        QuestionDetail::None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_rate_times_time() {
        let mut sampler = ValueSampler::seeded(33);
        let params = default_params(4);
        for _ in 0..100 {
            let out = generate(&params, &mut sampler);
            assert_eq!(out.result, out.operands[0] * out.operands[1]);
        }
    }
}
