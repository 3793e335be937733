//! Sieve properties and cross-validation against trial division.
//!
//! Run: cargo test --test sieve_properties

#![allow(clippy::unwrap_used, clippy::cast_possible_truncation)]

use std::sync::atomic::AtomicBool;

use proptest::prelude::*;
use twinviz::reference;
use twinviz::sieve::{
    generate, generate_cancellable, generate_twin_primes, generate_with_max, parse_limit,
    PrimalityTable, TwinPair,
};
use twinviz::Error;

// ============================================================================
// Cross-validation
// ============================================================================

#[test]
fn sieve_matches_trial_division_up_to_10_000() {
    let table = PrimalityTable::new(10_000).unwrap();
    for n in 0..=10_000u64 {
        assert_eq!(table.is_prime(n), reference::is_prime(n), "disagree at {n}");
    }
}

#[test]
fn pairs_match_trial_division_at_many_limits() {
    for limit in (0..=2_000).step_by(37) {
        assert_eq!(
            generate_twin_primes(limit).unwrap(),
            reference::twin_primes(limit),
            "limit {limit}"
        );
    }
}

#[test]
fn known_counts() {
    assert_eq!(generate(1_000).unwrap().pair_count(), 35);
    assert_eq!(generate(10_000).unwrap().pair_count(), 205);
    assert_eq!(generate(100_000).unwrap().pair_count(), 1_224);
    assert_eq!(generate(10_000).unwrap().prime_count(), 1_229);
}

#[test]
fn small_limits() {
    for limit in [0, 1, 4] {
        assert!(generate(limit).unwrap().is_empty());
    }
    let five: Vec<_> = generate(5).unwrap().pairs().iter().map(|p| p.as_tuple()).collect();
    assert_eq!(five, vec![(3, 5)]);
}

#[test]
fn ceiling_and_cancellation() {
    assert!(matches!(
        generate_with_max(1_001, 1_000),
        Err(Error::ResourceExhausted { limit: 1_001, max: 1_000 })
    ));

    let cancel = AtomicBool::new(true);
    assert!(matches!(
        generate_cancellable(1_000, 10_000, &cancel),
        Err(Error::Cancelled)
    ));
}

#[test]
fn limit_parsing() {
    assert_eq!(parse_limit(" 100 ").unwrap(), 100);
    for bad in ["", "-5", "10.5", "abc"] {
        assert!(matches!(parse_limit(bad), Err(Error::InvalidInput(_))), "{bad:?}");
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every pair is (p, p + 2), both prime, second <= limit.
    #[test]
    fn prop_pairs_are_twin_primes(limit in 0u64..20_000) {
        for pair in generate_twin_primes(limit).unwrap() {
            prop_assert_eq!(pair.second(), pair.first() + 2);
            prop_assert!(reference::is_prime(pair.first()));
            prop_assert!(reference::is_prime(pair.second()));
            prop_assert!(pair.second() <= limit);
        }
    }

    /// Strictly ascending, no duplicates.
    #[test]
    fn prop_pairs_strictly_ascending(limit in 0u64..20_000) {
        let pairs = generate_twin_primes(limit).unwrap();
        prop_assert!(pairs.windows(2).all(|w| w[0].first() < w[1].first()));
    }

    /// Raising the limit only appends pairs.
    #[test]
    fn prop_monotone_in_limit(a in 0u64..10_000, extra in 0u64..5_000) {
        let small = generate_twin_primes(a).unwrap();
        let large = generate_twin_primes(a + extra).unwrap();
        prop_assert!(large.len() >= small.len());
        prop_assert_eq!(&large[..small.len()], small.as_slice());
    }

    /// After (3, 5) every first member is 5 mod 6.
    #[test]
    fn prop_first_member_residue(limit in 8u64..20_000) {
        for pair in generate_twin_primes(limit).unwrap().into_iter().skip(1) {
            prop_assert_eq!(pair.first() % 6, 5);
        }
    }

    /// Table flags agree with trial division.
    #[test]
    fn prop_table_matches_trial_division(n in 0u64..50_000) {
        let table = PrimalityTable::new(n).unwrap();
        prop_assert_eq!(table.is_prime(n), reference::is_prime(n));
    }

    /// Tuples convert only when the gap is two.
    #[test]
    fn prop_tuple_conversion(p in 0u64..1_000_000, q in 0u64..1_000_000) {
        let converted = TwinPair::try_from((p, q));
        prop_assert_eq!(converted.is_ok(), q == p + 2);
    }
}
