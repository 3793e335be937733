//! Ordinary least squares trend of gap size against pair index.

use serde::Serialize;

/// Linear fit `y = slope * x + intercept` with `x = 0, 1, …, n - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Regression {
    /// Change in gap per pair index.
    pub slope: f64,
    /// Fitted gap at index 0.
    pub intercept: f64,
    /// Pearson correlation coefficient in `[-1, 1]`; `NaN` when either
    /// variable has zero variance.
    pub correlation: f64,
}

impl Regression {
    /// Fit the trend of `y` against its index.
    ///
    /// Uses the closed-form sums Σx, Σy, Σxy, Σx², Σy². With a single point
    /// (zero x variance) the slope is 0 and the intercept is that point.
    /// Returns `None` for an empty sample.
    #[must_use]
    pub fn fit(y: &[f64]) -> Option<Self> {
        if y.is_empty() {
            return None;
        }

        let n = y.len() as f64;
        let (mut sx, mut sy, mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0, 0.0, 0.0);
        for (i, &yi) in y.iter().enumerate() {
            let xi = i as f64;
            sx += xi;
            sy += yi;
            sxy += xi * yi;
            sxx += xi * xi;
            syy += yi * yi;
        }

        let var_x = n * sxx - sx * sx;
        let var_y = n * syy - sy * sy;
        let cov = n * sxy - sx * sy;

        let slope = if var_x > 0.0 { cov / var_x } else { 0.0 };
        let intercept = (sy - slope * sx) / n;
        let correlation = if var_x > 0.0 && var_y > 0.0 {
            (cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0)
        } else {
            f64::NAN
        };

        Some(Self {
            slope,
            intercept,
            correlation,
        })
    }

    /// Fitted value at index `x`.
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Whether gaps tend to widen along the sequence.
    #[must_use]
    pub fn is_widening(&self) -> bool {
        self.slope > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fit_limit_20_gaps() {
        let fit = Regression::fit(&[2.0, 6.0, 6.0]).unwrap();
        assert_relative_eq!(fit.slope, 2.0, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 8.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(fit.correlation, 12.0 / 192.0f64.sqrt(), epsilon = 1e-12);
        assert!(fit.is_widening());
    }

    #[test]
    fn test_perfect_line() {
        let fit = Regression::fit(&[1.0, 3.0, 5.0, 7.0]).unwrap();
        assert_relative_eq!(fit.slope, 2.0, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 1.0, epsilon = 1e-12);
        assert_relative_eq!(fit.correlation, 1.0, epsilon = 1e-12);
        assert_relative_eq!(fit.predict(10.0), 21.0, epsilon = 1e-9);
    }

    #[test]
    fn test_decreasing_line() {
        let fit = Regression::fit(&[9.0, 6.0, 3.0]).unwrap();
        assert_relative_eq!(fit.correlation, -1.0, epsilon = 1e-12);
        assert!(!fit.is_widening());
    }

    #[test]
    fn test_constant_sequence_has_undefined_correlation() {
        let fit = Regression::fit(&[6.0, 6.0, 6.0, 6.0]).unwrap();
        assert_relative_eq!(fit.slope, 0.0);
        assert_relative_eq!(fit.intercept, 6.0);
        assert!(fit.correlation.is_nan());
    }

    #[test]
    fn test_single_point() {
        let fit = Regression::fit(&[4.0]).unwrap();
        assert_relative_eq!(fit.slope, 0.0);
        assert_relative_eq!(fit.intercept, 4.0);
        assert!(fit.correlation.is_nan());
    }

    #[test]
    fn test_empty() {
        assert!(Regression::fit(&[]).is_none());
    }
}
