use serde::{Deserialize, Serialize};

use crate::generators::types::{Operation, QuestionDetail, QuestionOutput};
use crate::sampler::ValueSampler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    fn is_positive(&self) -> bool {
        matches!(self, Self::Right | Self::Up)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub grid_size: u32,
    pub max_steps: u32,
    pub directions: Vec<Direction>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            grid_size: 10,
            max_steps: 5,
            directions: vec![Direction::Left, Direction::Right],
        }
    }
}

pub fn default_params(year: u8) -> Params {
    match year.clamp(1, 6) {
        1 => Params {
            grid_size: 5,
            max_steps: 3,
            ..Params::default()
        },
        2 => Params::default(),
        3 => Params {
            grid_size: 10,
            max_steps: 8,
            directions: vec![
                Direction::Left,
                Direction::Right,
                Direction::Up,
                Direction::Down,
            ],
        },
        _ => Params {
            grid_size: 20,
            max_steps: 10,
            directions: vec![
                Direction::Left,
                Direction::Right,
                Direction::Up,
                Direction::Down,
            ],
        },
    }
}

/// Move along a numbered track: start position plus a signed number of
/// steps. The direction is chosen so the finish stays on the track.
pub fn generate(params: &Params, sampler: &mut ValueSampler) -> QuestionOutput {
    let grid_size = params.grid_size.max(2);
    let start = sampler.int_in(0, grid_size as i64);
    let steps = sampler.int_in(1, params.max_steps.max(1) as i64);

    let room_up = grid_size as i64 - start;
    let room_down = start;
    let directions = if params.directions.is_empty() {
        vec![Direction::Right]
    } else {
        params.directions.clone()
    };
    let feasible: Vec<Direction> = directions
        .iter()
        .copied()
        .filter(|d| {
            if d.is_positive() {
                steps <= room_up
            } else {
                steps <= room_down
            }
        })
        .collect();

    let (direction, signed_steps) = match sampler.pick(&feasible).copied() {
        Some(direction) => {
            let delta = if direction.is_positive() { steps } else { -steps };
            (direction, delta)
        }
        None => {
            // No direction fits the sampled distance: walk as far as the
            // track allows in the roomier direction.
            if room_up >= room_down {
                (Direction::Right, room_up.max(1).min(steps))
            } else {
                (Direction::Left, -room_down.max(1).min(steps))
            }
        }
    };

    let finish = start + signed_steps;
    QuestionOutput::plain(
        Operation::Position,
        vec![start as f64, signed_steps as f64],
        finish as f64,
        0,
        QuestionDetail::Position {
            direction: direction.as_str().to_string(),
            grid_size,
        },
    )
}
