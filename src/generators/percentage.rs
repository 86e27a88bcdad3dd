use serde::{Deserialize, Serialize};

use crate::generators::types::{Operation, QuestionDetail, QuestionOutput};
use crate::sampler::{round_dp, ValueSampler};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Percentages the question may ask for.
    pub percentages: Vec<i64>,
    pub max_base: i64,
    /// Restrict the base so the answer is a whole number.
    pub ensure_whole: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            percentages: vec![50, 25, 10],
            max_base: 100,
            ensure_whole: true,
        }
    }
}

pub fn default_params(year: u8) -> Params {
    match year.clamp(1, 6) {
        1..=3 => Params {
            percentages: vec![50],
            max_base: 20,
            ..Params::default()
        },
        4 => Params {
            percentages: vec![50, 25],
            max_base: 100,
            ..Params::default()
        },
        5 => Params {
            percentages: vec![50, 25, 10, 20],
            max_base: 200,
            ..Params::default()
        },
        _ => Params {
            percentages: vec![50, 25, 10, 20, 75, 5],
            max_base: 500,
            ..Params::default()
        },
    }
}

pub fn generate(params: &Params, sampler: &mut ValueSampler) -> QuestionOutput {
    let percentage = sampler
        .pick(&params.percentages)
        .copied()
        .unwrap_or(50)
        .clamp(1, 100);
    let max_base = params.max_base.max(1);

    let base = if params.ensure_whole {
        // The base must be a multiple of 100 / gcd(pct, 100) for an integer
        // answer.
        let unit = 100 / gcd(percentage, 100);
        let max_units = (max_base / unit).max(1);
        unit * sampler.int_in(1, max_units)
    } else {
        sampler.int_in(1, max_base)
    };

    let dp = if params.ensure_whole { 0 } else { 2 };
    let result = round_dp(base as f64 * percentage as f64 / 100.0, dp);
    QuestionOutput::plain(
        Operation::Percentage,
        vec![base as f64, percentage as f64],
        result,
        dp,
        QuestionDetail::None,
    )
}

fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a.max(1)
}
