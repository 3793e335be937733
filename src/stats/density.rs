//! Twin prime density against the Hardy–Littlewood conjecture.
//!
//! The conjecture predicts `π₂(x) ~ 2·C₂ · x / ln(x)²` twin pairs up to `x`,
//! with `C₂ ≈ 0.6601618158` the twin prime constant. This module reports the
//! observed counts next to that estimate, globally and over windows.
//!
//! # References
//!
//! - Hardy, G. H., & Littlewood, J. E. (1923). "Some problems of 'Partitio
//!   numerorum'; III." *Acta Mathematica*, 44, 1-70.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::sieve::{twin_members, Generation, TwinPair};

/// Twin prime constant `C₂ = Π_{p≥3} p(p-2)/(p-1)²`.
pub const TWIN_PRIME_CONSTANT: f64 = 0.660_161_815_846_869_6;

/// Leading factor `2·C₂` of the Hardy–Littlewood estimate.
pub const HARDY_LITTLEWOOD_FACTOR: f64 = 2.0 * TWIN_PRIME_CONSTANT;

/// Hardy–Littlewood estimate of the number of twin pairs up to `x`.
///
/// `NaN` for `x < 3`, where `ln(x)²` is too small for the formula to mean
/// anything (and is zero at 1).
#[must_use]
pub fn hardy_littlewood_estimate(x: u64) -> f64 {
    if x < 3 {
        return f64::NAN;
    }
    let xf = x as f64;
    HARDY_LITTLEWOOD_FACTOR * xf / xf.ln().powi(2)
}

// ============================================================================
// Global metrics
// ============================================================================

/// Density of twin pairs up to one limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityMetrics {
    /// Limit the pairs were generated for.
    pub limit: u64,
    /// Number of twin pairs.
    pub pair_count: usize,
    /// Number of primes `<= limit`.
    pub prime_count: usize,
    /// Observed pairs per 100 integers.
    pub observed: f64,
    /// Hardy–Littlewood pairs per 100 integers.
    pub theoretical: f64,
    /// `(observed - theoretical) / theoretical`.
    pub relative_difference: f64,
    /// Share of primes that belong to at least one twin pair.
    pub twin_proportion: f64,
    /// `pairs · ln(limit)² / limit`, the empirical counterpart of
    /// [`HARDY_LITTLEWOOD_FACTOR`].
    pub estimated_constant: f64,
}

impl DensityMetrics {
    /// Compute the metrics for `pairs` found up to `limit` among
    /// `prime_count` primes.
    ///
    /// Works for any number of pairs, including none.
    #[must_use]
    pub fn new(limit: u64, pairs: &[TwinPair], prime_count: usize) -> Self {
        let pair_count = pairs.len();
        let n = pair_count as f64;

        let observed = if limit == 0 {
            f64::NAN
        } else {
            n * 100.0 / limit as f64
        };
        let theoretical = hardy_littlewood_estimate(limit) * 100.0 / limit as f64;
        let relative_difference = (observed - theoretical) / theoretical;

        let twin_proportion = if prime_count == 0 {
            f64::NAN
        } else {
            twin_members(pairs).len() as f64 / prime_count as f64
        };

        let estimated_constant = if limit < 3 {
            f64::NAN
        } else {
            let lf = limit as f64;
            n * lf.ln().powi(2) / lf
        };

        Self {
            limit,
            pair_count,
            prime_count,
            observed,
            theoretical,
            relative_difference,
            twin_proportion,
            estimated_constant,
        }
    }

    /// Metrics of a whole generation.
    #[must_use]
    pub fn from_generation(generation: &Generation) -> Self {
        Self::new(
            generation.limit(),
            generation.pairs(),
            generation.prime_count(),
        )
    }
}

// ============================================================================
// Windowed density
// ============================================================================

/// Pair density over `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityWindow {
    /// Inclusive lower bound.
    pub start: u64,
    /// Exclusive upper bound.
    pub end: u64,
    /// Pairs starting in the window, per integer.
    pub density: f64,
}

impl DensityWindow {
    /// Midpoint of the window.
    #[must_use]
    pub fn center(&self) -> f64 {
        (self.start as f64 + self.end as f64) / 2.0
    }
}

/// Default window width: one hundredth of the limit, at least 10.
#[must_use]
pub fn default_window(limit: u64) -> u64 {
    (limit / 100).max(10)
}

/// Pair density over consecutive windows of width `window`.
///
/// Window starts are `0, w, 2w, … < limit`; each row spans two consecutive
/// starts, so the trailing partial window is not reported. A pair is counted
/// in the window holding its first element.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if `window` is zero.
pub fn density_windows(pairs: &[TwinPair], limit: u64, window: u64) -> Result<Vec<DensityWindow>> {
    if window == 0 {
        return Err(Error::InvalidInput("window width must be positive".to_string()));
    }

    let starts = limit.div_ceil(window);
    let rows = starts.saturating_sub(1);
    let width = window as f64;

    Ok((0..rows)
        .map(|i| {
            let start = i * window;
            let end = start + window;
            let lo = pairs.partition_point(|p| p.first() < start);
            let hi = pairs.partition_point(|p| p.first() < end);
            DensityWindow {
                start,
                end,
                density: (hi - lo) as f64 / width,
            }
        })
        .collect())
}

// ============================================================================
// Windowed proportion
// ============================================================================

/// Share of primes belonging to a twin pair over `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProportionWindow {
    /// Inclusive lower bound.
    pub start: f64,
    /// Exclusive upper bound (inclusive for the last window).
    pub end: f64,
    /// Primes in the window.
    pub primes: usize,
    /// Twin members in the window.
    pub members: usize,
    /// `members / primes`.
    pub proportion: f64,
}

impl ProportionWindow {
    /// Midpoint of the window.
    #[must_use]
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Default number of proportion windows: `min(100, limit / 10)`.
#[must_use]
pub fn default_proportion_windows(limit: u64) -> usize {
    usize::try_from((limit / 10).min(100)).unwrap_or(100)
}

/// Twin proportion over `windows` equal intervals of `[0, limit]`.
///
/// Intervals without primes are skipped.
#[must_use]
pub fn proportion_windows(generation: &Generation, windows: usize) -> Vec<ProportionWindow> {
    let limit = generation.limit();
    if windows == 0 || limit == 0 {
        return Vec::new();
    }

    let primes = generation.primes();
    let members = generation.twin_members();
    let step = limit as f64 / windows as f64;

    // Values are < upper for every window but the last, which also takes limit.
    let count_below = |values: &[u64], upper: f64, last: bool| {
        values.partition_point(|&v| {
            let v = v as f64;
            if last {
                v <= upper
            } else {
                v < upper
            }
        })
    };

    let mut rows = Vec::with_capacity(windows);
    for i in 0..windows {
        let start = i as f64 * step;
        let last = i + 1 == windows;
        let end = if last { limit as f64 } else { (i + 1) as f64 * step };

        let prime_count = count_below(primes, end, last) - count_below(primes, start, false);
        if prime_count == 0 {
            continue;
        }
        let member_count = count_below(&members, end, last) - count_below(&members, start, false);

        rows.push(ProportionWindow {
            start,
            end,
            primes: prime_count,
            members: member_count,
            proportion: member_count as f64 / prime_count as f64,
        });
    }
    rows
}

// ============================================================================
// Theory comparison
// ============================================================================

/// Actual pair count against the Hardy–Littlewood estimate at one limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TheoryPoint {
    /// Sub-limit.
    pub limit: u64,
    /// Pairs with `second <= limit`.
    pub actual: usize,
    /// Hardy–Littlewood estimate at `limit`.
    pub estimate: f64,
}

/// Default number of log-spaced comparison points.
pub const DEFAULT_THEORY_POINTS: usize = 20;

/// Compare actual counts with the estimate at `points` log-spaced limits
/// from `min(100, limit)` up to `limit`.
///
/// Counts come from the one generation: pairs are ascending, so the count up
/// to a sub-limit is a binary search. Sub-limits are deduplicated, so fewer
/// than `points` rows may come back for small limits.
#[must_use]
pub fn theory_comparison(generation: &Generation, points: usize) -> Vec<TheoryPoint> {
    let hi = generation.limit();
    let lo = hi.min(100);
    if hi < 3 || points == 0 {
        return Vec::new();
    }

    let (log_lo, log_hi) = ((lo as f64).log10(), (hi as f64).log10());
    let mut limits: Vec<u64> = (0..points)
        .map(|i| {
            if i + 1 == points {
                return hi;
            }
            let t = i as f64 / (points - 1) as f64;
            let value = 10f64.powf(log_lo + t * (log_hi - log_lo)) as u64;
            value.clamp(lo, hi)
        })
        .collect();
    limits.dedup();

    let pairs = generation.pairs();
    limits
        .into_iter()
        .filter(|&lim| lim >= 3)
        .map(|lim| TheoryPoint {
            limit: lim,
            actual: pairs.partition_point(|p| p.second() <= lim),
            estimate: hardy_littlewood_estimate(lim),
        })
        .collect()
}
