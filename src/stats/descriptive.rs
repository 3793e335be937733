//! Descriptive statistics over gap samples.
//!
//! Quantiles use linear interpolation between closest ranks
//! (Hyndman & Fan type 7, the NumPy/R default):
//!
//! ```text
//! k = p / 100 * (n - 1)
//! q = s[floor k] + (k - floor k) * (s[ceil k] - s[floor k])
//! ```
//!
//! # References
//!
//! - Hyndman, R. J., & Fan, Y. (1996). "Sample Quantiles in Statistical
//!   Packages." *The American Statistician*, 50(4), 361-365.

use std::collections::BTreeMap;

/// Arithmetic mean, `NaN` for an empty sample.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (divides by `n - 1`).
///
/// Undefined for fewer than two values, reported as `NaN`.
#[must_use]
pub fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Percentile of an ascending sample using linear interpolation.
///
/// `p` is clamped to `[0, 100]`. Returns `NaN` for an empty sample.
#[must_use]
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let k = (p.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
            let lo = k.floor() as usize;
            let hi = (k.ceil() as usize).min(n - 1);
            let frac = k - lo as f64;
            sorted[lo] + frac * (sorted[hi] - sorted[lo])
        }
    }
}

/// Median of an ascending sample; the mean of the two middle values for an
/// even count.
#[must_use]
pub fn median(sorted: &[f64]) -> f64 {
    percentile(sorted, 50.0)
}

/// Most frequent value and its frequency.
///
/// Ties resolve to the smallest value. `None` for an empty sample.
#[must_use]
pub fn mode(values: &[u64]) -> Option<(u64, usize)> {
    let mut counts: BTreeMap<u64, usize> = BTreeMap::new();
    for &v in values {
        *counts.entry(v).or_insert(0) += 1;
    }

    // Ascending iteration + strict comparison keeps the smallest tied value.
    let mut best: Option<(u64, usize)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((value, count));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        assert_relative_eq!(mean(&[2.0, 6.0, 6.0]), 14.0 / 3.0);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_sample_std_dev() {
        let values = [2.0, 6.0, 6.0];
        let m = mean(&values);
        assert_relative_eq!(sample_std_dev(&values, m), (16.0f64 / 3.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_sample_std_dev_single_value_is_nan() {
        assert!(sample_std_dev(&[4.0], 4.0).is_nan());
    }

    #[test]
    fn test_percentile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        // k = 0.25 * 3 = 0.75
        assert_relative_eq!(percentile(&sorted, 25.0), 1.75);
        // k = 0.75 * 3 = 2.25
        assert_relative_eq!(percentile(&sorted, 75.0), 3.25);
        assert_relative_eq!(percentile(&sorted, 0.0), 1.0);
        assert_relative_eq!(percentile(&sorted, 100.0), 4.0);
    }

    #[test]
    fn test_percentile_edges() {
        assert!(percentile(&[], 50.0).is_nan());
        assert_relative_eq!(percentile(&[7.0], 99.0), 7.0);
        // out-of-range p is clamped
        assert_relative_eq!(percentile(&[1.0, 9.0], 150.0), 9.0);
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_relative_eq!(median(&[1.0, 3.0, 8.0]), 3.0);
        assert_relative_eq!(median(&[1.0, 3.0, 5.0, 8.0]), 4.0);
    }

    #[test]
    fn test_mode_ties_pick_smallest() {
        assert_eq!(mode(&[12, 6, 12, 6]), Some((6, 2)));
        assert_eq!(mode(&[2, 6, 6]), Some((6, 2)));
        assert_eq!(mode(&[18, 4]), Some((4, 1)));
        assert_eq!(mode(&[]), None);
    }
}
