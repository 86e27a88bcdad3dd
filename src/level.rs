use serde::{Deserialize, Serialize};

/// Lowest reachable level in decimal form (year 1, sub-level 1).
pub const MIN_LEVEL_DECIMAL: f64 = 1.1;
/// Highest reachable level in decimal form (year 6, sub-level 4).
pub const MAX_LEVEL_DECIMAL: f64 = 6.4;

/// A (year, sub-level) difficulty pair.
///
/// Arithmetic treats the level as the decimal `year.subLevel` ("3.2" == 3.2),
/// clamped to `[1.1, 6.4]`; after an adjustment the sub-level is re-derived
/// and clamped to `[1, 4]`. Ordering by (year, sub_level) matches decimal
/// ordering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyLevel {
    pub year: u8,
    pub sub_level: u8,
}

impl DifficultyLevel {
    pub fn new(year: u8, sub_level: u8) -> Self {
        Self {
            year: year.clamp(1, 6),
            sub_level: sub_level.clamp(1, 4),
        }
    }

    pub fn as_decimal(&self) -> f64 {
        self.year as f64 + self.sub_level as f64 / 10.0
    }

    pub fn from_decimal(value: f64) -> Self {
        let clamped = value.clamp(MIN_LEVEL_DECIMAL, MAX_LEVEL_DECIMAL);
        let tenths = (clamped * 10.0).round() as i64;
        Self::new((tenths / 10) as u8, (tenths % 10) as u8)
    }

    /// Applies a signed decimal increment with range clamping.
    pub fn offset(&self, delta: f64) -> Self {
        Self::from_decimal(self.as_decimal() + delta)
    }

    pub fn display_name(&self) -> String {
        format!("{}.{}", self.year, self.sub_level)
    }
}

impl Default for DifficultyLevel {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl std::fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.year, self.sub_level)
    }
}
