//! Digit-level carry/borrow checks used by the constrained arithmetic
//! generators. Decimal operands are scaled to integers first so the checks
//! work on a uniform digit grid.

pub fn scale_to_int(value: f64, decimal_places: u8) -> i64 {
    let factor = 10f64.powi(decimal_places as i32);
    (value * factor).round() as i64
}

/// True when column-wise addition of the operands produces a carry in any
/// digit position (column digit sum reaching 10).
pub fn addition_carries(operands: &[f64], decimal_places: u8) -> bool {
    let mut scaled: Vec<i64> = operands
        .iter()
        .map(|v| scale_to_int(*v, decimal_places))
        .collect();
    while scaled.iter().any(|v| *v > 0) {
        let column: i64 = scaled.iter().map(|v| v % 10).sum();
        if column >= 10 {
            return true;
        }
        for v in scaled.iter_mut() {
            *v /= 10;
        }
    }
    false
}

/// True when subtracting `subtrahend` from `minuend` requires borrowing in
/// any digit position.
pub fn subtraction_borrows(minuend: f64, subtrahend: f64, decimal_places: u8) -> bool {
    let mut a = scale_to_int(minuend, decimal_places);
    let mut b = scale_to_int(subtrahend, decimal_places);
    while b > 0 {
        if a % 10 < b % 10 {
            return true;
        }
        a /= 10;
        b /= 10;
    }
    false
}
