//! Scales mapping data values to pixel positions.
//!
//! Based on the Grammar of Graphics [Wilkinson 2005]: a scale owns a data
//! domain and a pixel range and maps one onto the other.

use crate::error::{Error, Result};

/// Maps domain values to range values.
pub trait Scale {
    /// Transform a domain value to a range value.
    fn scale(&self, value: f32) -> f32;

    /// Domain extent.
    fn domain(&self) -> (f32, f32);

    /// Range extent.
    fn range(&self) -> (f32, f32);

    /// Tick positions (in domain units) for about `count` ticks.
    fn ticks(&self, count: usize) -> Vec<f32>;
}

/// Linear scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f32, f32),
    range: (f32, f32),
}

impl LinearScale {
    /// Create a linear scale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScaleDomain`] if the domain is empty or not finite.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(Error::ScaleDomain("domain must be finite".to_string()));
        }
        if (domain.1 - domain.0).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain(
                "domain min and max cannot be equal".to_string(),
            ));
        }
        Ok(Self { domain, range })
    }

    /// Scale over the extent of `data`, padded by `pad` (a fraction of the
    /// extent) on both sides. A single distinct value is widened by 1.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when `data` holds no finite value.
    pub fn from_data(data: &[f32], range: (f32, f32), pad: f32) -> Result<Self> {
        let (min, max) = extent(data).ok_or(Error::EmptyData)?;
        let (min, max) = if max - min < f32::EPSILON {
            (min - 1.0, max + 1.0)
        } else {
            let p = (max - min) * pad;
            (min - p, max + p)
        };
        Self::new((min, max), range)
    }

    /// Map a range value back to the domain.
    #[must_use]
    pub fn invert(&self, value: f32) -> f32 {
        let t = (value - self.range.0) / (self.range.1 - self.range.0);
        self.domain.0 + t * (self.domain.1 - self.domain.0)
    }
}

impl Scale for LinearScale {
    fn scale(&self, value: f32) -> f32 {
        let t = (value - self.domain.0) / (self.domain.1 - self.domain.0);
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    fn domain(&self) -> (f32, f32) {
        self.domain
    }

    fn range(&self) -> (f32, f32) {
        self.range
    }

    fn ticks(&self, count: usize) -> Vec<f32> {
        let (lo, hi) = (self.domain.0.min(self.domain.1), self.domain.0.max(self.domain.1));
        let step = nice_step((hi - lo) / count.max(1) as f32);
        let mut ticks = Vec::new();
        let mut t = (lo / step).ceil() * step;
        while t <= hi + step * 1e-3 {
            ticks.push(t);
            t += step;
        }
        ticks
    }
}

/// Base-10 logarithmic scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogScale {
    domain: (f32, f32),
    range: (f32, f32),
}

impl LogScale {
    /// Create a log scale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScaleDomain`] if the domain is not strictly positive
    /// or is empty.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        if domain.0 <= 0.0 || domain.1 <= 0.0 {
            return Err(Error::ScaleDomain(
                "log scale domain must be positive".to_string(),
            ));
        }
        if (domain.1 / domain.0 - 1.0).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain(
                "domain min and max cannot be equal".to_string(),
            ));
        }
        Ok(Self { domain, range })
    }

    /// Log scale over the positive values of `data`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScaleDomain`] if `data` has no positive value.
    pub fn from_data(data: &[f32], range: (f32, f32)) -> Result<Self> {
        let positive: Vec<f32> = data.iter().copied().filter(|v| *v > 0.0).collect();
        let (min, max) = extent(&positive)
            .ok_or_else(|| Error::ScaleDomain("no positive values for log scale".to_string()))?;
        if max / min - 1.0 < f32::EPSILON {
            return Self::new((min / 10.0, max * 10.0), range);
        }
        Self::new((min, max), range)
    }
}

impl Scale for LogScale {
    fn scale(&self, value: f32) -> f32 {
        let (lo, hi) = (self.domain.0.log10(), self.domain.1.log10());
        let t = (value.max(f32::MIN_POSITIVE).log10() - lo) / (hi - lo);
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    fn domain(&self) -> (f32, f32) {
        self.domain
    }

    fn range(&self) -> (f32, f32) {
        self.range
    }

    /// Powers of ten inside the domain; `count` is ignored.
    fn ticks(&self, _count: usize) -> Vec<f32> {
        // Tolerance keeps exact powers of ten that log10 lands just beside.
        let lo = (self.domain.0.min(self.domain.1).log10() - 1e-4).ceil() as i32;
        let hi = (self.domain.0.max(self.domain.1).log10() + 1e-4).floor() as i32;
        (lo..=hi).map(|e| 10f32.powi(e)).collect()
    }
}

/// Either scale, chosen at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisScale {
    /// Linear axis.
    Linear(LinearScale),
    /// Logarithmic axis.
    Log(LogScale),
}

impl Scale for AxisScale {
    fn scale(&self, value: f32) -> f32 {
        match self {
            Self::Linear(s) => s.scale(value),
            Self::Log(s) => s.scale(value),
        }
    }

    fn domain(&self) -> (f32, f32) {
        match self {
            Self::Linear(s) => s.domain(),
            Self::Log(s) => s.domain(),
        }
    }

    fn range(&self) -> (f32, f32) {
        match self {
            Self::Linear(s) => s.range(),
            Self::Log(s) => s.range(),
        }
    }

    fn ticks(&self, count: usize) -> Vec<f32> {
        match self {
            Self::Linear(s) => s.ticks(count),
            Self::Log(s) => s.ticks(count),
        }
    }
}

/// `(min, max)` of the finite values, `None` if there are none.
#[must_use]
pub fn extent(data: &[f32]) -> Option<(f32, f32)> {
    data.iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Round a raw step up to 1, 2 or 5 times a power of ten.
fn nice_step(raw: f32) -> f32 {
    if raw <= 0.0 || !raw.is_finite() {
        return 1.0;
    }
    let magnitude = 10f32.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_scale() {
        let s = LinearScale::new((0.0, 100.0), (0.0, 500.0)).unwrap();
        assert!((s.scale(50.0) - 250.0).abs() < 1e-4);
        assert!((s.invert(250.0) - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_linear_scale_inverted_range() {
        // screen y grows downwards
        let s = LinearScale::new((0.0, 10.0), (400.0, 0.0)).unwrap();
        assert!((s.scale(0.0) - 400.0).abs() < 1e-4);
        assert!((s.scale(10.0)).abs() < 1e-4);
    }

    #[test]
    fn test_linear_scale_errors() {
        assert!(LinearScale::new((1.0, 1.0), (0.0, 1.0)).is_err());
        assert!(LinearScale::new((0.0, f32::NAN), (0.0, 1.0)).is_err());
        assert!(matches!(
            LinearScale::from_data(&[], (0.0, 1.0), 0.0),
            Err(Error::EmptyData)
        ));
    }

    #[test]
    fn test_from_data_single_value() {
        let s = LinearScale::from_data(&[6.0, 6.0], (0.0, 100.0), 0.05).unwrap();
        assert_eq!(s.domain(), (5.0, 7.0));
    }

    #[test]
    fn test_linear_ticks() {
        let s = LinearScale::new((0.0, 100.0), (0.0, 1.0)).unwrap();
        assert_eq!(s.ticks(5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn test_log_scale() {
        let s = LogScale::new((1.0, 1000.0), (0.0, 300.0)).unwrap();
        assert!((s.scale(10.0) - 100.0).abs() < 1e-3);
        assert!((s.scale(100.0) - 200.0).abs() < 1e-3);
        assert_eq!(s.ticks(0), vec![1.0, 10.0, 100.0, 1000.0]);
        assert!(LogScale::new((0.0, 10.0), (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_log_from_data_skips_non_positive() {
        let s = LogScale::from_data(&[0.0, 10.0, 1000.0], (0.0, 1.0)).unwrap();
        assert_eq!(s.domain(), (10.0, 1000.0));
        assert!(LogScale::from_data(&[0.0, -1.0], (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_extent_ignores_nan() {
        assert_eq!(extent(&[3.0, f32::NAN, -1.0]), Some((-1.0, 3.0)));
        assert_eq!(extent(&[f32::NAN]), None);
    }

    #[test]
    fn test_nice_step() {
        assert!((nice_step(17.0) - 20.0).abs() < 1e-4);
        assert!((nice_step(0.3) - 0.5).abs() < 1e-6);
        assert!((nice_step(0.0) - 1.0).abs() < 1e-6);
    }
}
