use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::SAMPLE_RETRY_LIMIT;
use crate::generators::types::{Operation, QuestionDetail, QuestionOutput};
use crate::sampler::ValueSampler;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub max_slope: i64,
    pub max_intercept: i64,
    pub allow_negative_slope: bool,
    /// How many terms of the sequence the question shows.
    pub term_count: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            max_slope: 5,
            max_intercept: 10,
            allow_negative_slope: false,
            term_count: 4,
        }
    }
}

pub fn default_params(year: u8) -> Params {
    match year.clamp(1, 6) {
        1 => Params {
            max_slope: 2,
            max_intercept: 5,
            ..Params::default()
        },
        2 => Params {
            max_slope: 3,
            max_intercept: 10,
            ..Params::default()
        },
        3 => Params {
            max_slope: 5,
            max_intercept: 10,
            ..Params::default()
        },
        4 => Params {
            max_slope: 8,
            max_intercept: 20,
            ..Params::default()
        },
        5 => Params {
            max_slope: 10,
            max_intercept: 50,
            allow_negative_slope: true,
            ..Params::default()
        },
        _ => Params {
            max_slope: 12,
            max_intercept: 100,
            allow_negative_slope: true,
            term_count: 5,
            ..Params::default()
        },
    }
}

/// Continue the linear sequence `m·n + b`. A slope of exactly zero is a
/// degenerate horizontal line, rejected by bounded retry with a non-zero
/// fallback.
pub fn generate(params: &Params, sampler: &mut ValueSampler) -> QuestionOutput {
    let max_slope = params.max_slope.max(1);
    let slope = sample_slope(params, max_slope, sampler);
    let intercept = sampler.int_in(0, params.max_intercept.max(0));
    let term_count = params.term_count.clamp(3, 8);

    let terms: Vec<f64> = (1..=term_count as i64)
        .map(|n| (slope * n + intercept) as f64)
        .collect();
    let next = (slope * (term_count as i64 + 1) + intercept) as f64;

    QuestionOutput::plain(
        Operation::LinearPattern,
        terms,
        next,
        0,
        QuestionDetail::Sequence {
            slope: slope as f64,
            intercept: intercept as f64,
            equation: equation_string(slope, intercept),
        },
    )
}

fn sample_slope(params: &Params, max_slope: i64, sampler: &mut ValueSampler) -> i64 {
    let low = if params.allow_negative_slope {
        -max_slope
    } else {
        0
    };
    for _ in 0..SAMPLE_RETRY_LIMIT {
        let candidate = sampler.int_in(low, max_slope);
        if candidate != 0 {
            return candidate;
        }
    }
    warn!("zero-slope rejection exhausted retries, using fallback slope");
    1
}

/// Human-readable equation with 1 / -1 / 0 coefficients special-cased.
pub fn equation_string(slope: i64, intercept: i64) -> String {
    let slope_part = match slope {
        0 => String::new(),
        1 => "x".to_string(),
        -1 => "-x".to_string(),
        other => format!("{other}x"),
    };
    if slope_part.is_empty() {
        return format!("y = {intercept}");
    }
    match intercept.cmp(&0) {
        std::cmp::Ordering::Equal => format!("y = {slope_part}"),
        std::cmp::Ordering::Greater => format!("y = {slope_part} + {intercept}"),
        std::cmp::Ordering::Less => format!("y = {slope_part} - {}", -intercept),
    }
}
