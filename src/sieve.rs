//! Sieve of Eratosthenes twin prime generator.
//!
//! Builds a primality table for `0..=limit`, extracts the ascending prime
//! list and pairs adjacent primes that differ by exactly two.
//!
//! # Complexity
//!
//! Marking runs in `O(n log log n)` time and `O(n)` space (one byte per
//! integer). The table is dropped as soon as the prime list is extracted.
//!
//! # Policies
//!
//! - Limits below 5 produce an empty result: no twin pair fits below 5, and
//!   this is a boundary case rather than a user error.
//! - Limits above [`DEFAULT_MAX_LIMIT`] (or a caller-supplied ceiling) fail
//!   with [`Error::ResourceExhausted`] before anything is allocated.
//!
//! # References
//!
//! - Hardy, G. H., & Wright, E. M. (2008). *An Introduction to the Theory of
//!   Numbers*, 6th ed., §1.4. Oxford University Press.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Error, Result};

/// Largest limit accepted by [`generate`] (about 500 MB of flags).
pub const DEFAULT_MAX_LIMIT: u64 = 500_000_000;

/// Smallest limit for which a twin pair exists: (3, 5).
pub const MIN_TWIN_LIMIT: u64 = 5;

/// Number of marking operations between two cancellation checks.
pub const CANCEL_CHECK_INTERVAL: usize = 1 << 16;

// ============================================================================
// Twin Pair
// ============================================================================

/// A pair of primes `(p, p + 2)`.
///
/// Only the first element is stored, so the difference of two is guaranteed
/// by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TwinPair {
    first: u64,
}

impl TwinPair {
    /// Difference between the two members of every pair.
    pub const GAP: u64 = 2;

    /// Create a pair starting at `first`.
    ///
    /// Primality is not checked; pairs produced by [`generate`] are prime by
    /// construction. Use this for hand-built fixtures.
    #[must_use]
    pub const fn new(first: u64) -> Self {
        Self { first }
    }

    /// The smaller prime.
    #[must_use]
    pub const fn first(self) -> u64 {
        self.first
    }

    /// The larger prime (`first + 2`).
    #[must_use]
    pub const fn second(self) -> u64 {
        self.first + Self::GAP
    }

    /// Both members as a tuple.
    #[must_use]
    pub const fn as_tuple(self) -> (u64, u64) {
        (self.first, self.second())
    }
}

impl From<TwinPair> for (u64, u64) {
    fn from(pair: TwinPair) -> Self {
        pair.as_tuple()
    }
}

impl TryFrom<(u64, u64)> for TwinPair {
    type Error = Error;

    fn try_from((p, q): (u64, u64)) -> Result<Self> {
        match p.checked_add(Self::GAP) {
            Some(expected) if expected == q => Ok(Self::new(p)),
            _ => Err(Error::InvalidInput(format!(
                "({p}, {q}) is not a twin pair: members must differ by {}",
                Self::GAP
            ))),
        }
    }
}

impl fmt::Display for TwinPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second())
    }
}

// ============================================================================
// Primality Table
// ============================================================================

/// Boolean primality flags for `0..=limit`.
///
/// Ephemeral: [`generate`] builds one per call and discards it after the
/// prime list is extracted.
#[derive(Debug, Clone)]
pub struct PrimalityTable {
    flags: Vec<bool>,
}

impl PrimalityTable {
    /// Sieve `0..=limit` with the default ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceExhausted`] if `limit` exceeds
    /// [`DEFAULT_MAX_LIMIT`] or the table cannot be allocated.
    ///
    /// # Example
    ///
    /// ```
    /// use twinviz::sieve::PrimalityTable;
    ///
    /// let table = PrimalityTable::new(30).unwrap();
    /// assert!(table.is_prime(29));
    /// assert!(!table.is_prime(27));
    /// ```
    pub fn new(limit: u64) -> Result<Self> {
        Self::with_max(limit, DEFAULT_MAX_LIMIT)
    }

    /// Sieve `0..=limit` with a caller-chosen ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceExhausted`] if `limit > max_limit` or the
    /// table cannot be allocated.
    pub fn with_max(limit: u64, max_limit: u64) -> Result<Self> {
        Self::build(limit, max_limit, None)
    }

    fn build(limit: u64, max_limit: u64, cancel: Option<&AtomicBool>) -> Result<Self> {
        let exhausted = || Error::ResourceExhausted {
            limit,
            max: max_limit,
        };

        if limit > max_limit {
            return Err(exhausted());
        }
        if is_cancelled(cancel) {
            return Err(Error::Cancelled);
        }

        let size = usize::try_from(limit)
            .ok()
            .and_then(|n| n.checked_add(1))
            .ok_or_else(exhausted)?;

        let mut flags = Vec::new();
        flags.try_reserve_exact(size).map_err(|_| exhausted())?;
        flags.resize(size, true);

        flags[0] = false;
        if size > 1 {
            flags[1] = false;
        }

        // Every composite <= limit has a factor <= isqrt(limit), and the
        // multiples below i*i were already struck by smaller factors.
        let root = isqrt(limit) as usize;
        let mut since_check = 0usize;
        for i in 2..=root {
            if !flags[i] {
                continue;
            }
            for j in (i * i..size).step_by(i) {
                flags[j] = false;
                since_check += 1;
                if since_check == CANCEL_CHECK_INTERVAL {
                    since_check = 0;
                    if is_cancelled(cancel) {
                        return Err(Error::Cancelled);
                    }
                }
            }
        }

        Ok(Self { flags })
    }

    /// Upper bound of the table (inclusive).
    #[must_use]
    pub fn limit(&self) -> u64 {
        (self.flags.len() - 1) as u64
    }

    /// Number of flags (`limit + 1`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Always false: a table covers at least `0`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Whether `n` is prime. Values outside the table are reported as not prime.
    #[must_use]
    pub fn is_prime(&self, n: u64) -> bool {
        usize::try_from(n)
            .ok()
            .and_then(|i| self.flags.get(i))
            .copied()
            .unwrap_or(false)
    }

    /// Number of primes in the table.
    #[must_use]
    pub fn prime_count(&self) -> usize {
        self.flags.iter().filter(|&&p| p).count()
    }

    /// Ascending list of every prime in the table.
    #[must_use]
    pub fn primes(&self) -> Vec<u64> {
        self.flags
            .iter()
            .enumerate()
            .filter(|&(_, &prime)| prime)
            .map(|(n, _)| n as u64)
            .collect()
    }
}

fn is_cancelled(cancel: Option<&AtomicBool>) -> bool {
    cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
}

/// Integer square root: the largest `r` with `r * r <= n`.
pub(crate) fn isqrt(n: u64) -> u64 {
    let mut r = (n as f64).sqrt() as u64;
    while r.checked_mul(r).map_or(true, |sq| sq > n) {
        r -= 1;
    }
    while (r + 1).checked_mul(r + 1).is_some_and(|sq| sq <= n) {
        r += 1;
    }
    r
}

// ============================================================================
// Generation
// ============================================================================

/// Immutable result of one generator call.
///
/// Consumers (statistics, plots, export) borrow it read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    limit: u64,
    primes: Vec<u64>,
    pairs: Vec<TwinPair>,
}

impl Generation {
    /// Wrap a complete ascending prime list.
    pub(crate) fn from_primes(limit: u64, primes: Vec<u64>) -> Self {
        let pairs = twin_pairs(&primes);
        Self {
            limit,
            primes,
            pairs,
        }
    }

    /// The limit this generation was computed for.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Every prime `<= limit`, ascending.
    #[must_use]
    pub fn primes(&self) -> &[u64] {
        &self.primes
    }

    /// Number of primes `<= limit`.
    #[must_use]
    pub fn prime_count(&self) -> usize {
        self.primes.len()
    }

    /// Twin pairs in ascending order.
    #[must_use]
    pub fn pairs(&self) -> &[TwinPair] {
        &self.pairs
    }

    /// Number of twin pairs.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no twin pair was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Consume the generation, keeping only the pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<TwinPair> {
        self.pairs
    }

    /// Distinct primes that belong to at least one twin pair, ascending.
    ///
    /// 5 belongs to both (3, 5) and (5, 7) and is listed once.
    #[must_use]
    pub fn twin_members(&self) -> Vec<u64> {
        twin_members(&self.pairs)
    }
}

/// Distinct members of an ascending pair sequence.
pub(crate) fn twin_members(pairs: &[TwinPair]) -> Vec<u64> {
    let mut members: Vec<u64> = Vec::with_capacity(pairs.len() * 2);
    for pair in pairs {
        if members.last() != Some(&pair.first()) {
            members.push(pair.first());
        }
        members.push(pair.second());
    }
    members
}

/// Pair adjacent primes that differ by two.
///
/// `primes` must be ascending and complete (no prime skipped), as produced
/// by [`PrimalityTable::primes`].
#[must_use]
pub fn twin_pairs(primes: &[u64]) -> Vec<TwinPair> {
    primes
        .windows(2)
        .filter(|w| w[1] - w[0] == TwinPair::GAP)
        .map(|w| TwinPair::new(w[0]))
        .collect()
}

/// Generate every twin pair up to `limit` with the default ceiling.
///
/// # Errors
///
/// Returns [`Error::ResourceExhausted`] if `limit` exceeds [`DEFAULT_MAX_LIMIT`].
///
/// # Example
///
/// ```
/// use twinviz::sieve::generate;
///
/// let generation = generate(20).unwrap();
/// let firsts: Vec<u64> = generation.pairs().iter().map(|p| p.first()).collect();
/// assert_eq!(firsts, vec![3, 5, 11, 17]);
/// ```
pub fn generate(limit: u64) -> Result<Generation> {
    generate_with_max(limit, DEFAULT_MAX_LIMIT)
}

/// Generate every twin pair up to `limit` with a caller-chosen ceiling.
///
/// # Errors
///
/// Returns [`Error::ResourceExhausted`] if `limit > max_limit`.
pub fn generate_with_max(limit: u64, max_limit: u64) -> Result<Generation> {
    let table = PrimalityTable::with_max(limit, max_limit)?;
    Ok(from_table(limit, &table))
}

/// Generate with a cooperative cancellation flag.
///
/// The flag is polled before sieving and every [`CANCEL_CHECK_INTERVAL`]
/// marking operations.
///
/// # Errors
///
/// Returns [`Error::Cancelled`] once `cancel` is observed set, or
/// [`Error::ResourceExhausted`] if `limit > max_limit`.
pub fn generate_cancellable(limit: u64, max_limit: u64, cancel: &AtomicBool) -> Result<Generation> {
    let table = PrimalityTable::build(limit, max_limit, Some(cancel))?;
    Ok(from_table(limit, &table))
}

fn from_table(limit: u64, table: &PrimalityTable) -> Generation {
    Generation::from_primes(limit, table.primes())
}

/// Twin pairs up to `limit`, ascending by first element.
///
/// # Errors
///
/// Returns [`Error::ResourceExhausted`] if `limit` exceeds [`DEFAULT_MAX_LIMIT`].
pub fn generate_twin_primes(limit: u64) -> Result<Vec<TwinPair>> {
    generate(limit).map(Generation::into_pairs)
}

/// Every prime up to `limit`, ascending.
///
/// # Errors
///
/// Returns [`Error::ResourceExhausted`] if `limit` exceeds [`DEFAULT_MAX_LIMIT`].
pub fn primes_up_to(limit: u64) -> Result<Vec<u64>> {
    Ok(PrimalityTable::new(limit)?.primes())
}

/// Parse a user-supplied limit.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for empty, negative, fractional or
/// non-numeric text.
pub fn parse_limit(text: &str) -> Result<u64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("limit is empty".to_string()));
    }
    if trimmed.starts_with('-') {
        return Err(Error::InvalidInput(format!(
            "limit must be a positive integer, got {trimmed}"
        )));
    }

    trimmed.parse::<u64>().map_err(|_| {
        if trimmed.parse::<f64>().is_ok() {
            Error::InvalidInput(format!("limit must be an integer, got {trimmed}"))
        } else {
            Error::InvalidInput(format!("limit is not a number: {trimmed}"))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn firsts(pairs: &[TwinPair]) -> Vec<u64> {
        pairs.iter().map(|p| p.first()).collect()
    }

    #[test]
    fn test_limit_20_fixture() {
        let pairs = generate_twin_primes(20).unwrap();
        let tuples: Vec<(u64, u64)> = pairs.iter().map(|p| p.as_tuple()).collect();
        assert_eq!(tuples, vec![(3, 5), (5, 7), (11, 13), (17, 19)]);
    }

    #[test]
    fn test_limit_100_fixture() {
        let pairs = generate_twin_primes(100).unwrap();
        assert_eq!(pairs.len(), 8);
        assert_eq!(firsts(&pairs), vec![3, 5, 11, 17, 29, 41, 59, 71]);
    }

    #[test]
    fn test_small_limits_are_empty() {
        for limit in 0..MIN_TWIN_LIMIT {
            assert!(generate_twin_primes(limit).unwrap().is_empty(), "limit {limit}");
        }
    }

    #[test]
    fn test_limit_5_has_first_pair() {
        let pairs = generate_twin_primes(5).unwrap();
        assert_eq!(pairs, vec![TwinPair::new(3)]);
    }

    #[test]
    fn test_second_member_must_fit_under_limit() {
        // (17, 19) needs limit >= 19
        assert_eq!(firsts(&generate_twin_primes(18).unwrap()), vec![3, 5, 11]);
        assert_eq!(firsts(&generate_twin_primes(19).unwrap()), vec![3, 5, 11, 17]);
    }

    #[test]
    fn test_table_zero_and_one() {
        let t0 = PrimalityTable::new(0).unwrap();
        assert_eq!(t0.limit(), 0);
        assert_eq!(t0.prime_count(), 0);

        let t1 = PrimalityTable::new(1).unwrap();
        assert!(!t1.is_prime(1));
        assert!(t1.primes().is_empty());
    }

    #[test]
    fn test_table_prime_count() {
        assert_eq!(PrimalityTable::new(100).unwrap().prime_count(), 25);
        assert_eq!(PrimalityTable::new(1000).unwrap().prime_count(), 168);
    }

    #[test]
    fn test_table_out_of_range_is_not_prime() {
        let table = PrimalityTable::new(10).unwrap();
        assert!(table.is_prime(7));
        assert!(!table.is_prime(11));
        assert!(!table.is_prime(u64::MAX));
    }

    #[test]
    fn test_perfect_square_limits() {
        // isqrt boundary: 49 must be struck when limit == 49
        let table = PrimalityTable::new(49).unwrap();
        assert!(!table.is_prime(49));
        assert!(table.is_prime(47));
    }

    #[test]
    fn test_resource_ceiling() {
        let err = generate_with_max(1_000, 999).unwrap_err();
        assert!(matches!(err, Error::ResourceExhausted { limit: 1_000, max: 999 }));

        let err = generate(DEFAULT_MAX_LIMIT + 1).unwrap_err();
        assert!(matches!(err, Error::ResourceExhausted { .. }));
    }

    #[test]
    fn test_cancellation() {
        let cancel = AtomicBool::new(true);
        let err = generate_cancellable(1_000, DEFAULT_MAX_LIMIT, &cancel).unwrap_err();
        assert!(matches!(err, Error::Cancelled));

        let cancel = AtomicBool::new(false);
        let generation = generate_cancellable(1_000, DEFAULT_MAX_LIMIT, &cancel).unwrap();
        assert_eq!(generation, generate(1_000).unwrap());
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(generate(10_000).unwrap(), generate(10_000).unwrap());
    }

    #[test]
    fn test_generation_accessors() {
        let generation = generate(100).unwrap();
        assert_eq!(generation.limit(), 100);
        assert_eq!(generation.prime_count(), 25);
        assert_eq!(generation.pair_count(), 8);
        assert!(!generation.is_empty());
        assert_eq!(generation.primes()[0], 2);
    }

    #[test]
    fn test_twin_members_are_distinct() {
        let generation = generate(20).unwrap();
        assert_eq!(generation.twin_members(), vec![3, 5, 7, 11, 13, 17, 19]);
    }

    #[test]
    fn test_twin_pairs_scan() {
        assert_eq!(firsts(&twin_pairs(&[2, 3, 5, 7, 11, 13])), vec![3, 5, 11]);
        assert!(twin_pairs(&[]).is_empty());
        assert!(twin_pairs(&[2]).is_empty());
    }

    #[test]
    fn test_primes_up_to() {
        assert_eq!(primes_up_to(30).unwrap(), vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn test_isqrt() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(24), 4);
        assert_eq!(isqrt(25), 5);
        assert_eq!(isqrt(u64::MAX), u64::from(u32::MAX));
    }

    #[test]
    fn test_pair_conversions() {
        let pair = TwinPair::new(41);
        assert_eq!(pair.second(), 43);
        assert_eq!(<(u64, u64)>::from(pair), (41, 43));
        assert_eq!(TwinPair::try_from((41, 43)).unwrap(), pair);
        assert!(TwinPair::try_from((41, 44)).is_err());
        assert!(TwinPair::try_from((u64::MAX, 1)).is_err());
        assert_eq!(pair.to_string(), "(41, 43)");
    }

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit("100").unwrap(), 100);
        assert_eq!(parse_limit("  42 ").unwrap(), 42);
        assert!(matches!(parse_limit("-5"), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_limit("3.5"), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_limit("abc"), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_limit(""), Err(Error::InvalidInput(_))));
    }
}
