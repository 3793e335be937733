//! Trial-division ("basic") twin prime generator.
//!
//! `O(n √n)` and kept only as an independent oracle: the cross-validation
//! tests compare it with [`crate::sieve`], and [`crate::performance`] times
//! both. Production paths use the sieve.

use crate::sieve::{isqrt, twin_pairs, Generation, TwinPair};

/// Whether `n` is prime, by trial division up to `isqrt(n)`.
#[must_use]
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    (2..=isqrt(n)).all(|d| n % d != 0)
}

/// Every prime up to `limit`, ascending.
#[must_use]
pub fn primes_up_to(limit: u64) -> Vec<u64> {
    (2..=limit).filter(|&n| is_prime(n)).collect()
}

/// Twin pairs up to `limit`, ascending by first element.
#[must_use]
pub fn twin_primes(limit: u64) -> Vec<TwinPair> {
    twin_pairs(&primes_up_to(limit))
}

/// Full generation by trial division, comparable with
/// [`crate::sieve::generate`].
#[must_use]
pub fn generate(limit: u64) -> Generation {
    Generation::from_primes(limit, primes_up_to(limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_prime_small() {
        let primes: Vec<u64> = (0..30).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn test_squares_are_composite() {
        for p in [2u64, 3, 5, 7, 11, 13] {
            assert!(!is_prime(p * p));
        }
    }

    #[test]
    fn test_twin_primes_limit_20() {
        let tuples: Vec<(u64, u64)> = twin_primes(20).iter().map(|p| p.as_tuple()).collect();
        assert_eq!(tuples, vec![(3, 5), (5, 7), (11, 13), (17, 19)]);
    }

    #[test]
    fn test_empty_below_five() {
        for limit in 0..5 {
            assert!(twin_primes(limit).is_empty());
        }
    }

    #[test]
    fn test_generate_matches_sieve() {
        for limit in [0, 5, 20, 100, 1_000] {
            assert_eq!(generate(limit), crate::sieve::generate(limit).unwrap());
        }
    }
}
