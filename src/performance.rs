//! Timing comparison of the trial-division and sieve generators.

use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::reference;
use crate::sieve;

/// Limits timed by `twinviz compare` when none are given.
pub const DEFAULT_COMPARISON_LIMITS: [u64; 4] = [1_000, 5_000, 10_000, 50_000];

/// Wall-clock times of both generators at one limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodComparison {
    /// Limit both generators ran with.
    pub limit: u64,
    /// Trial-division time.
    pub basic: Duration,
    /// Sieve time.
    pub sieve: Duration,
    /// Pairs found (identical for both).
    pub pair_count: usize,
}

impl MethodComparison {
    /// How many times faster the sieve ran. Infinite if the sieve time
    /// rounds to zero.
    #[must_use]
    pub fn speedup(&self) -> f64 {
        let sieve = self.sieve.as_secs_f64();
        if sieve == 0.0 {
            return f64::INFINITY;
        }
        self.basic.as_secs_f64() / sieve
    }
}

/// Time both generators at `limit` and check that they agree.
///
/// # Errors
///
/// Returns [`Error::MethodMismatch`] if the outputs differ, or any error of
/// [`sieve::generate_twin_primes`].
pub fn compare_methods(limit: u64) -> Result<MethodComparison> {
    // Sieve first: it rejects over-ceiling limits before the slow path runs.
    let start = Instant::now();
    let sieve_pairs = sieve::generate_twin_primes(limit)?;
    let sieve = start.elapsed();

    let start = Instant::now();
    let basic_pairs = reference::twin_primes(limit);
    let basic = start.elapsed();

    if basic_pairs != sieve_pairs {
        return Err(Error::MethodMismatch {
            limit,
            basic: basic_pairs.len(),
            sieve: sieve_pairs.len(),
        });
    }

    let comparison = MethodComparison {
        limit,
        basic,
        sieve,
        pair_count: sieve_pairs.len(),
    };
    tracing::debug!(
        "compared at limit {}: basic {:?}, sieve {:?}, speedup {:.1}x",
        limit,
        basic,
        sieve,
        comparison.speedup()
    );
    Ok(comparison)
}

/// Run [`compare_methods`] at each limit, in order.
///
/// # Errors
///
/// Stops at the first failing limit.
pub fn compare_all(limits: &[u64]) -> Result<Vec<MethodComparison>> {
    limits.iter().map(|&limit| compare_methods(limit)).collect()
}
