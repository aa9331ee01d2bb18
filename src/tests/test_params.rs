// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::OsRng;

use crate::zkp::random_below;
use crate::{JPakeError, Parameters, SecurityLevel};

const SMALL_PRIMES: [u32; 10] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29];

/// Miller-Rabin with random witnesses
fn is_probable_prime(n: &BigUint, rounds: usize) -> bool {
    let one = BigUint::one();
    let two = BigUint::from(2u32);
    if *n < two {
        return false;
    }
    for small in SMALL_PRIMES {
        let small = BigUint::from(small);
        if *n == small {
            return true;
        }
        if (n % &small).is_zero() {
            return false;
        }
    }

    let n_minus_one = n - &one;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    'witness: for _ in 0..rounds {
        // a in [2, n - 2]
        let a = random_below(&(n - 3u32), &mut OsRng) + &two;
        let mut x = a.modpow(&d, n);
        if x == one || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

fn tiers() -> [Arc<Parameters>; 3] {
    [
        Parameters::nist_80(),
        Parameters::nist_112(),
        Parameters::nist_128(),
    ]
}

#[test]
fn test_primality_check_sanity() {
    assert!(is_probable_prime(&BigUint::from(7919u32), 8));
    assert!(!is_probable_prime(&BigUint::from(7917u32), 8));
    // Carmichael number
    assert!(!is_probable_prime(&BigUint::from(561u32), 8));
}

#[test]
fn test_p_is_prime() {
    for params in tiers() {
        assert!(is_probable_prime(params.p(), 8));
    }
}

#[test]
fn test_q_is_prime() {
    for params in tiers() {
        assert!(is_probable_prime(params.q(), 16));
    }
}

#[test]
fn test_tier_sizes() {
    let sizes: Vec<_> = tiers()
        .iter()
        .map(|params| (params.p().bits(), params.q().bits()))
        .collect();
    assert_eq!(sizes, vec![(1024, 160), (2048, 224), (3072, 256)]);
}

#[test]
fn test_tiers_pass_structural_checks() {
    for params in tiers() {
        let rebuilt = Parameters::new(params.p().clone(), params.g().clone(), params.q().clone())
            .expect("Built-in parameters failed validation");
        assert_eq!(&rebuilt, params.as_ref());
    }
}

#[test]
fn test_tiers_are_shared() {
    assert!(Arc::ptr_eq(&Parameters::nist_80(), &Parameters::nist_80()));
    assert!(Arc::ptr_eq(
        &SecurityLevel::Nist112.parameters(),
        &Parameters::nist_112()
    ));
    assert_eq!(SecurityLevel::default(), SecurityLevel::Nist128);
    assert!(Arc::ptr_eq(
        &SecurityLevel::default().parameters(),
        &Parameters::nist_128()
    ));
}

#[test]
fn test_custom_parameters() {
    // p = 23, q = 11, g = 4 generates the subgroup of order 11
    let p = BigUint::from(23u32);
    let q = BigUint::from(11u32);
    assert!(Parameters::new(p.clone(), BigUint::from(4u32), q.clone()).is_ok());

    let invalid = [
        (BigUint::from(3u32), BigUint::from(2u32), BigUint::from(2u32)),
        (p.clone(), BigUint::one(), q.clone()),
        (p.clone(), p.clone(), q.clone()),
        (p.clone(), BigUint::from(4u32), BigUint::from(7u32)),
        (p.clone(), BigUint::from(4u32), p.clone()),
        // 5 generates the whole group, not the order 11 subgroup
        (p.clone(), BigUint::from(5u32), q.clone()),
    ];
    for (p, g, q) in invalid {
        assert!(matches!(
            Parameters::new(p, g, q),
            Err(JPakeError::InvalidParameters(_))
        ));
    }
}
