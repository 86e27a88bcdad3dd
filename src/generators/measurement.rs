use serde::{Deserialize, Serialize};

use crate::generators::types::{Operation, QuestionDetail, QuestionOutput};
use crate::sampler::{round_dp, ValueSampler};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementKind {
    RectangleArea,
    RectanglePerimeter,
    SquareArea,
    SquarePerimeter,
    TrianglePerimeter,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub problem_types: Vec<MeasurementKind>,
    pub max_side: f64,
    pub step: f64,
    pub decimal_places: u8,
    pub unit: String,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            problem_types: vec![
                MeasurementKind::RectangleArea,
                MeasurementKind::RectanglePerimeter,
            ],
            max_side: 10.0,
            step: 1.0,
            decimal_places: 0,
            unit: "cm".to_string(),
        }
    }
}

pub fn default_params(year: u8) -> Params {
    match year.clamp(1, 6) {
        1 | 2 => Params {
            problem_types: vec![
                MeasurementKind::SquarePerimeter,
                MeasurementKind::RectanglePerimeter,
            ],
            max_side: 6.0,
            ..Params::default()
        },
        3 => Params {
            max_side: 8.0,
            ..Params::default()
        },
        4 => Params {
            problem_types: vec![
                MeasurementKind::RectangleArea,
                MeasurementKind::RectanglePerimeter,
                MeasurementKind::SquareArea,
                MeasurementKind::TrianglePerimeter,
            ],
            max_side: 12.0,
            ..Params::default()
        },
        5 => Params {
            problem_types: vec![
                MeasurementKind::RectangleArea,
                MeasurementKind::RectanglePerimeter,
                MeasurementKind::SquareArea,
                MeasurementKind::SquarePerimeter,
                MeasurementKind::TrianglePerimeter,
            ],
            max_side: 20.0,
            ..Params::default()
        },
        _ => Params {
            problem_types: vec![
                MeasurementKind::RectangleArea,
                MeasurementKind::RectanglePerimeter,
                MeasurementKind::SquareArea,
                MeasurementKind::SquarePerimeter,
                MeasurementKind::TrianglePerimeter,
            ],
            max_side: 20.0,
            step: 0.5,
            decimal_places: 1,
            ..Params::default()
        },
    }
}

pub fn generate(params: &Params, sampler: &mut ValueSampler) -> QuestionOutput {
    let kind = sampler
        .pick(&params.problem_types)
        .copied()
        .unwrap_or(MeasurementKind::RectanglePerimeter);
    let dp = params.decimal_places.min(3);
    let step = if params.step > 0.0 { params.step } else { 1.0 };
    let max_side = params.max_side.max(step);

    match kind {
        MeasurementKind::RectangleArea | MeasurementKind::RectanglePerimeter => {
            let width = sampler.next_value(max_side, dp, step, step);
            let height = sampler.next_value(max_side, dp, step, step);
            let (operation, result) = if kind == MeasurementKind::RectangleArea {
                (Operation::Area, width * height)
            } else {
                (Operation::Perimeter, 2.0 * (width + height))
            };
            QuestionOutput::plain(
                operation,
                vec![width, height],
                round_dp(result, dp.max(2)),
                dp,
                QuestionDetail::Rectangle {
                    width,
                    height,
                    unit: params.unit.clone(),
                },
            )
        }
        MeasurementKind::SquareArea | MeasurementKind::SquarePerimeter => {
            let side = sampler.next_value(max_side, dp, step, step);
            let (operation, result) = if kind == MeasurementKind::SquareArea {
                (Operation::Area, side * side)
            } else {
                (Operation::Perimeter, 4.0 * side)
            };
            QuestionOutput::plain(
                operation,
                vec![side, side],
                round_dp(result, dp.max(2)),
                dp,
                QuestionDetail::Rectangle {
                    width: side,
                    height: side,
                    unit: params.unit.clone(),
                },
            )
        }
        MeasurementKind::TrianglePerimeter => {
            let a = sampler.next_value(max_side, dp, step, step);
            let b = sampler.next_value(max_side, dp, step, step);
            let c = third_side(a, b, step, dp, sampler);
            QuestionOutput::plain(
                Operation::Perimeter,
                vec![a, b, c],
                round_dp(a + b + c, dp.max(2)),
                dp,
                QuestionDetail::Triangle {
                    sides: [a, b, c],
                    unit: params.unit.clone(),
                },
            )
        }
    }
}

/// Synthesizes a third side satisfying the strict triangle inequality
/// `|a-b| < c < a+b`. When the valid interval collapses below one grid step
/// the smaller known side is used instead.
fn third_side(a: f64, b: f64, step: f64, dp: u8, sampler: &mut ValueSampler) -> f64 {
    let low = (a - b).abs() + step;
    let high = a + b - step;
    if low > high + 1e-9 {
        return a.min(b);
    }
    sampler.next_value(high, dp, low, step)
}
