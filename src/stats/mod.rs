//! Statistics over twin prime sequences.
//!
//! The gap sequence is the difference between the first elements of
//! consecutive pairs. [`compute_statistics`] summarizes it; [`density`]
//! compares the pair count with the Hardy–Littlewood estimate.
//!
//! # Example
//!
//! ```
//! use twinviz::sieve::generate;
//! use twinviz::stats::compute_statistics;
//!
//! let generation = generate(100).unwrap();
//! let stats = compute_statistics(generation.pairs()).unwrap();
//! assert_eq!(stats.count, 7);
//! assert_eq!(stats.mode, 12);
//! ```

pub mod density;
pub mod descriptive;
pub mod regression;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::sieve::{Generation, TwinPair};

pub use density::DensityMetrics;
pub use descriptive::percentile;
pub use regression::Regression;

/// Fewest pairs that still yield a gap.
pub const MIN_PAIRS: usize = 2;

/// Differences between the first elements of consecutive pairs.
///
/// `pairs` must be ascending.
#[must_use]
pub fn gaps(pairs: &[TwinPair]) -> Vec<u64> {
    pairs
        .windows(2)
        .map(|w| w[1].first().saturating_sub(w[0].first()))
        .collect()
}

/// Summary of a gap sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GapStatistics {
    /// Number of gaps (`pairs - 1`).
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median.
    pub median: f64,
    /// Most frequent gap, smallest on ties.
    pub mode: u64,
    /// Occurrences of [`Self::mode`].
    pub mode_frequency: usize,
    /// Sample standard deviation; `NaN` with a single gap.
    pub std_dev: f64,
    /// `std_dev / mean`.
    pub coefficient_of_variation: f64,
    /// Smallest gap.
    pub min: u64,
    /// Largest gap.
    pub max: u64,
    /// 25th percentile.
    pub q1: f64,
    /// 75th percentile.
    pub q3: f64,
    /// Interquartile range.
    pub iqr: f64,
    /// 90th percentile.
    pub p90: f64,
    /// 99th percentile.
    pub p99: f64,
    /// Trend of gap against pair index.
    pub regression: Regression,
}

impl GapStatistics {
    /// Percentage form of the coefficient of variation.
    #[must_use]
    pub fn cv_percent(&self) -> f64 {
        self.coefficient_of_variation * 100.0
    }
}

/// Summarize the gaps of an ascending pair sequence.
///
/// # Errors
///
/// Returns [`Error::InsufficientData`] for fewer than two pairs and
/// [`Error::InvalidInput`] if the pairs are not strictly ascending.
pub fn compute_statistics(pairs: &[TwinPair]) -> Result<GapStatistics> {
    if pairs.len() < MIN_PAIRS {
        return Err(Error::InsufficientData {
            required: MIN_PAIRS,
            actual: pairs.len(),
        });
    }
    if pairs.windows(2).any(|w| w[1].first() <= w[0].first()) {
        return Err(Error::InvalidInput(
            "twin pairs must be strictly ascending".to_string(),
        ));
    }

    let raw = gaps(pairs);
    let values: Vec<f64> = raw.iter().map(|&g| g as f64).collect();
    let mut sorted = values.clone();
    sorted.sort_by(f64::total_cmp);

    let mean = descriptive::mean(&values);
    let std_dev = descriptive::sample_std_dev(&values, mean);
    let coefficient_of_variation = if mean == 0.0 { f64::NAN } else { std_dev / mean };
    let (mode, mode_frequency) = descriptive::mode(&raw).unwrap_or((0, 0));
    let q1 = percentile(&sorted, 25.0);
    let q3 = percentile(&sorted, 75.0);
    let regression = Regression::fit(&values).ok_or(Error::EmptyData)?;

    Ok(GapStatistics {
        count: raw.len(),
        mean,
        median: descriptive::median(&sorted),
        mode,
        mode_frequency,
        std_dev,
        coefficient_of_variation,
        min: raw.iter().copied().min().unwrap_or(0),
        max: raw.iter().copied().max().unwrap_or(0),
        q1,
        q3,
        iqr: q3 - q1,
        p90: percentile(&sorted, 90.0),
        p99: percentile(&sorted, 99.0),
        regression,
    })
}

/// Gap statistics together with the density metrics of one generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatSummary {
    /// Gap statistics.
    pub gaps: GapStatistics,
    /// Density against the Hardy–Littlewood estimate.
    pub density: DensityMetrics,
}

impl StatSummary {
    /// Summarize a generation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientData`] if the generation holds fewer than
    /// two pairs.
    pub fn from_generation(generation: &Generation) -> Result<Self> {
        Ok(Self {
            gaps: compute_statistics(generation.pairs())?,
            density: DensityMetrics::from_generation(generation),
        })
    }
}
