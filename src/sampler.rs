use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Rounds to `decimal_places` fractional digits.
pub fn round_dp(value: f64, decimal_places: u8) -> f64 {
    let factor = 10f64.powi(decimal_places as i32);
    (value * factor).round() / factor
}

/// Bounded random value source shared by every generator.
///
/// Values are drawn on a `step` grid inside `[min, max]` and formatted to a
/// fixed number of decimal places. Seeded construction gives a reproducible
/// trace for tests; production callers use the entropy constructor.
pub struct ValueSampler {
    rng: ChaCha8Rng,
}

impl ValueSampler {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draws a value in `[min, max]` quantized to `step`, rounded to
    /// `decimal_places`. Rounding never pushes the value outside the range.
    pub fn next_value(&mut self, max: f64, decimal_places: u8, min: f64, step: f64) -> f64 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let step = if step > 0.0 { step } else { 1.0 };

        let slots = ((hi - lo) / step).floor() as i64;
        let k = if slots > 0 {
            self.rng.gen_range(0..=slots)
        } else {
            0
        };

        let raw = lo + k as f64 * step;
        let rounded = round_dp(raw, decimal_places);
        if rounded > hi {
            round_dp(raw - step, decimal_places).max(lo)
        } else if rounded < lo {
            lo
        } else {
            rounded
        }
    }

    /// Integer draw on an inclusive range; degenerate ranges collapse to `min`.
    pub fn int_in(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.rng.gen_range(0..items.len());
        items.get(idx)
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen::<f64>() < probability
    }
}

impl Default for ValueSampler {
    fn default() -> Self {
        Self::new()
    }
}
