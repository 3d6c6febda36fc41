//! Point estimate of a salary from a possibly open-ended range.

/// Weight applied to an upper bound when the lower bound is unknown.
pub const UPPER_ONLY_FACTOR: f64 = 0.8;

/// Weight applied to a lower bound when the upper bound is unknown.
pub const LOWER_ONLY_FACTOR: f64 = 1.2;

/// Estimate a single salary figure from a `(lower, upper)` range.
///
/// - both bounds: arithmetic mean
/// - upper only: `upper * 0.8`
/// - lower only: `lower * 1.2`
/// - neither: `None`
///
/// Providers report an unspecified bound as `0` as often as they omit it, so a
/// bound that is not strictly positive counts as absent.
pub fn estimate(lower: Option<f64>, upper: Option<f64>) -> Option<f64> {
    match (bound(lower), bound(upper)) {
        (Some(lower), Some(upper)) => Some((lower + upper) / 2.0),
        (None, Some(upper)) => Some(upper * UPPER_ONLY_FACTOR),
        (Some(lower), None) => Some(lower * LOWER_ONLY_FACTOR),
        (None, None) => None,
    }
}

fn bound(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}
