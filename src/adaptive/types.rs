use serde::{Deserialize, Serialize};

use crate::level::DifficultyLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentAction {
    Advance,
    Maintain,
    Reduce,
    /// Freezes automatic movement and enters confidence mode; exited only
    /// by explicitly toggling confidence mode off.
    Lock,
}

impl AdjustmentAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Advance => "advance",
            Self::Maintain => "maintain",
            Self::Reduce => "reduce",
            Self::Lock => "lock",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "advance" => Self::Advance,
            "reduce" => Self::Reduce,
            "lock" => Self::Lock,
            _ => Self::Maintain,
        }
    }
}

/// The controller's verdict for one evaluation. Pure output; callers decide
/// whether to persist `to_level`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyAdjustment {
    pub action: AdjustmentAction,
    pub from_level: DifficultyLevel,
    pub to_level: DifficultyLevel,
    pub reason: String,
    pub confidence: f64,
    pub recommendation: String,
}
