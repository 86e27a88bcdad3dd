use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::generators::types::{Operation, QuestionDetail, QuestionOutput, StepOutput};
use crate::sampler::{round_dp, ValueSampler};

/// Substituted when a chained step receives an unusable previous result.
const STEP_FALLBACK_VALUE: f64 = 10.0;

/// Operations a step may perform. A closed set keeps result extraction
/// uniform instead of inspecting each generator's raw output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepModel {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StepSpec {
    pub model: StepModel,
    /// Feed the previous step's numeric result in as the first operand.
    pub use_previous_result: bool,
    pub max_value: f64,
}

impl Default for StepSpec {
    fn default() -> Self {
        Self {
            model: StepModel::Addition,
            use_previous_result: false,
            max_value: 20.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub steps: Vec<StepSpec>,
    pub decimal_places: u8,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            steps: vec![
                StepSpec::default(),
                StepSpec {
                    model: StepModel::Multiplication,
                    use_previous_result: true,
                    max_value: 5.0,
                },
            ],
            decimal_places: 0,
        }
    }
}

pub fn default_params(year: u8) -> Params {
    match year.clamp(1, 6) {
        1 | 2 => Params {
            steps: vec![
                StepSpec {
                    max_value: 10.0,
                    ..StepSpec::default()
                },
                StepSpec {
                    model: StepModel::Addition,
                    use_previous_result: true,
                    max_value: 10.0,
                },
            ],
            decimal_places: 0,
        },
        3 | 4 => Params::default(),
        _ => Params {
            steps: vec![
                StepSpec {
                    model: StepModel::Multiplication,
                    max_value: 12.0,
                    ..StepSpec::default()
                },
                StepSpec {
                    model: StepModel::Subtraction,
                    use_previous_result: true,
                    max_value: 50.0,
                },
                StepSpec {
                    model: StepModel::Division,
                    use_previous_result: true,
                    max_value: 100.0,
                },
            ],
            decimal_places: 0,
        },
    }
}

/// Executes the step sequence in order, feeding each flagged step the
/// previous numeric result. A step that cannot use its input substitutes a
/// fallback value and the sequence continues; the composer always returns a
/// complete step list and final result.
pub fn generate(params: &Params, sampler: &mut ValueSampler) -> QuestionOutput {
    let dp = params.decimal_places.min(3);
    let specs: &[StepSpec] = if params.steps.is_empty() {
        &DEFAULT_SPECS
    } else {
        &params.steps
    };

    let mut previous: Option<f64> = None;
    let mut steps = Vec::with_capacity(specs.len());
    for spec in specs {
        let step = run_step(spec, previous, dp, sampler);
        previous = Some(step.result);
        steps.push(step);
    }

    let last = steps.last().cloned().unwrap_or(StepOutput {
        operation: Operation::Addition,
        operands: vec![0.0, 0.0],
        result: 0.0,
        chained: false,
    });

    QuestionOutput::plain(
        Operation::MultiStep,
        last.operands.clone(),
        last.result,
        dp,
        QuestionDetail::Steps { steps },
    )
}

static DEFAULT_SPECS: [StepSpec; 2] = [
    StepSpec {
        model: StepModel::Addition,
        use_previous_result: false,
        max_value: 20.0,
    },
    StepSpec {
        model: StepModel::Multiplication,
        use_previous_result: true,
        max_value: 5.0,
    },
];

fn run_step(
    spec: &StepSpec,
    previous: Option<f64>,
    dp: u8,
    sampler: &mut ValueSampler,
) -> StepOutput {
    let bound = spec.max_value.max(2.0);
    let chained = spec.use_previous_result && previous.is_some();
    let first = if chained {
        match previous {
            // A non-finite or non-positive carry cannot seed these step
            // types; substitute the fallback and keep the sequence going.
            Some(value) if value.is_finite() && value > 0.0 => round_dp(value, dp),
            _ => {
                debug!("unusable previous result, substituting step fallback");
                STEP_FALLBACK_VALUE
            }
        }
    } else {
        sampler.next_value(bound, dp, 1.0, 1.0)
    };

    match spec.model {
        StepModel::Addition => {
            let second = sampler.next_value(bound, dp, 1.0, 1.0);
            StepOutput {
                operation: Operation::Addition,
                operands: vec![first, second],
                result: round_dp(first + second, dp),
                chained,
            }
        }
        StepModel::Subtraction => {
            // Subtrahend capped by the minuend so the chain stays positive.
            let second = sampler.next_value((first - 1.0).max(1.0), dp, 1.0, 1.0);
            let (minuend, subtrahend) = if second > first {
                (second, first)
            } else {
                (first, second)
            };
            StepOutput {
                operation: Operation::Subtraction,
                operands: vec![minuend, subtrahend],
                result: round_dp(minuend - subtrahend, dp),
                chained,
            }
        }
        StepModel::Multiplication => {
            let second = sampler.next_value(bound.min(12.0), 0, 2.0, 1.0);
            StepOutput {
                operation: Operation::Multiplication,
                operands: vec![first, second],
                result: round_dp(first * second, dp),
                chained,
            }
        }
        StepModel::Division => {
            let divisor = select_divisor(first, sampler);
            StepOutput {
                operation: Operation::Division,
                operands: vec![first, divisor],
                result: round_dp(first / divisor, dp.max(2)),
                chained,
            }
        }
    }
}

/// Divisor bound for a chained division: `max(2, floor(previous / 2))`.
/// Divisors of the dividend are preferred so the quotient stays whole.
fn select_divisor(dividend: f64, sampler: &mut ValueSampler) -> f64 {
    let cap = ((dividend / 2.0).floor() as i64).max(2);
    let whole = dividend.fract() == 0.0;
    if whole {
        let dividend = dividend as i64;
        let divisors: Vec<i64> = (2..=cap).filter(|d| dividend % d == 0).collect();
        if let Some(divisor) = sampler.pick(&divisors) {
            return *divisor as f64;
        }
    }
    sampler.int_in(2, cap) as f64
}
