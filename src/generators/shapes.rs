use serde::{Deserialize, Serialize};

use crate::generators::types::{Operation, QuestionDetail, QuestionOutput};
use crate::sampler::ValueSampler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Circle,
    Triangle,
    Square,
    Rectangle,
    Pentagon,
    Hexagon,
    Heptagon,
    Octagon,
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Triangle => "triangle",
            Self::Square => "square",
            Self::Rectangle => "rectangle",
            Self::Pentagon => "pentagon",
            Self::Hexagon => "hexagon",
            Self::Heptagon => "heptagon",
            Self::Octagon => "octagon",
        }
    }

    /// Straight side count; zero for the circle.
    pub fn sides(&self) -> u32 {
        match self {
            Self::Circle => 0,
            Self::Triangle => 3,
            Self::Square | Self::Rectangle => 4,
            Self::Pentagon => 5,
            Self::Hexagon => 6,
            Self::Heptagon => 7,
            Self::Octagon => 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub shapes: Vec<ShapeKind>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            shapes: vec![
                ShapeKind::Circle,
                ShapeKind::Triangle,
                ShapeKind::Square,
                ShapeKind::Rectangle,
            ],
        }
    }
}

pub fn default_params(year: u8) -> Params {
    match year.clamp(1, 6) {
        1 => Params::default(),
        2 => Params {
            shapes: vec![
                ShapeKind::Circle,
                ShapeKind::Triangle,
                ShapeKind::Square,
                ShapeKind::Rectangle,
                ShapeKind::Pentagon,
                ShapeKind::Hexagon,
            ],
        },
        _ => Params {
            shapes: vec![
                ShapeKind::Circle,
                ShapeKind::Triangle,
                ShapeKind::Square,
                ShapeKind::Rectangle,
                ShapeKind::Pentagon,
                ShapeKind::Hexagon,
                ShapeKind::Heptagon,
                ShapeKind::Octagon,
            ],
        },
    }
}

/// Name the shape / count its sides.
pub fn generate(params: &Params, sampler: &mut ValueSampler) -> QuestionOutput {
    let shape = sampler
        .pick(&params.shapes)
        .copied()
        .unwrap_or(ShapeKind::Square);
    let sides = shape.sides();

    QuestionOutput::plain(
        Operation::ShapeRecognition,
        vec![sides as f64],
        sides as f64,
        0,
        QuestionDetail::Shape {
            name: shape.name().to_string(),
            sides,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_counts_match_shape() {
        let mut sampler = ValueSampler::seeded(64);
        let params = default_params(3);
        for _ in 0..50 {
            let out = generate(&params, &mut sampler);
            match &out.detail {
                QuestionDetail::Shape { name, sides } => {
                    let shape = params
                        .shapes
                        .iter()
                        .find(|s| s.name() == name)
                        .expect("unknown shape name");
                    assert_eq!(*sides, shape.sides());
                    assert_eq!(out.result, *sides as f64);
                }
                other => panic!("unexpected detail: {other:?}"),
            }
        }
    }
}
