//! Ratios and standardized deviations that never produce `NaN`.

/// Spreads at or below this value are treated as zero.
const SPREAD_EPSILON: f32 = 1e-6;

/// `made / attempted`, defined as `0.0` when nothing was attempted.
///
/// # Examples
///
/// ```
/// # use regimen_stats::ratio::ratio;
/// assert_eq!(ratio(3, 4), 0.75);
/// assert_eq!(ratio(0, 0), 0.0);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn ratio(made: u64, attempted: u64) -> f32 {
    if attempted == 0 {
        return 0.0;
    }
    made as f32 / attempted as f32
}

/// Standardized deviation `(value - center) / spread`.
///
/// Returns `0.0` when `spread` is not positive, or when the result would not be
/// finite.
#[must_use]
pub fn zscore(value: f32, center: f32, spread: f32) -> f32 {
    if spread.is_nan() || spread <= SPREAD_EPSILON {
        return 0.0;
    }
    let z = (value - center) / spread;
    if z.is_finite() { z } else { 0.0 }
}
