// Copyright 2023 Rémy Oudompheng. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Fermat factorization.
//!
//! Fermat's method writes an odd x as a difference of squares: scan
//! k = 1, 2, ... and test whether y = (s+k)^2 - x is a perfect square,
//! where s = isqrt(x). The factors are then (s+k) -+ sqrt(y). The scan
//! maintains y incrementally and skips square root extraction when the
//! last decimal digit of y rules a square out.
//!
//! Bibliography:
//! https://en.wikipedia.org/wiki/Fermat%27s_factorization_method

use crate::arith::{div_by_q, isqrt};
use crate::u128::U128;

/// Odd primes up to 293 divided out before Fermat runs.
const SMALL_PRIMES: [u64; 61] = [
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293,
];

/// Record a prime power into a factor list kept sorted at the end.
pub(crate) fn push_factor(factors: &mut Vec<(U128, u32)>, p: U128, count: u32) {
    for f in factors.iter_mut() {
        if f.0 == p {
            f.1 += count;
            return;
        }
    }
    factors.push((p, count));
}

pub(crate) fn sort_factors(factors: &mut [(U128, u32)]) {
    factors.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
}

/// One Fermat step: split x into two factors.
///
/// Returns (s, s) for a perfect square and (x, 1) when the scan exhausts
/// k <= s, which for odd x free of small factors means x is prime.
///
/// On odd k an extra check runs from the factor side: by the Fermat
/// identity a candidate factor F appears at index k = (F^2 + x)/2F - s,
/// so k itself is tested as a divisor, which shortcuts inputs whose
/// smallest factor is far below sqrt(x).
pub fn fermat_method(x: U128) -> (U128, U128) {
    let (x_sqrt, exact) = isqrt(x);
    if exact {
        return (x_sqrt, x_sqrt);
    }
    let error = x - x_sqrt * x_sqrt;
    // y for k = 1: (s+1)^2 - x = 2s + 1 - (x - s^2)
    let mut y = U128::from(2) * x_sqrt + U128::one() - error;
    {
        let (y_sqrt, exact) = isqrt(y);
        y = y + (x_sqrt + x_sqrt + U128::from(3));
        if exact {
            return (
                x_sqrt + U128::one() - y_sqrt,
                x_sqrt + U128::one() + y_sqrt,
            );
        }
    }
    let k_upper = x_sqrt;
    let mut k = U128::from(2);
    loop {
        if k > k_upper {
            return (x, U128::one()); // x is prime
        }
        if k.low % 2 == 1 {
            let n1 = k * k + x;
            if n1.low % 2 == 0 {
                let (q1, remainder) = n1.divmod(k + k);
                if remainder.is_zero() && q1 > x_sqrt {
                    let (q2, remainder) = x.divmod(k);
                    if remainder.is_zero() {
                        return (k, q2);
                    }
                }
            }
        }
        let delta = (x_sqrt + x_sqrt) + (k + k) + U128::one();
        let r = y.mod10();
        if r != 1 && r != 9 {
            // A square cannot end this way; skip the root extraction.
            y = y + delta;
            k = k + U128::one();
            continue;
        }
        let (y_sqrt, exact) = isqrt(y);
        y = y + delta;
        if !exact {
            k = k + U128::one();
            continue;
        }
        return (x_sqrt + k - y_sqrt, x_sqrt + k + y_sqrt);
    }
}

/// Full factorization into prime powers, sorted by prime.
///
/// Divides out 2 (Fermat needs an odd input), then the small prime table,
/// then applies Fermat recursively: each split is fed back until a unit
/// factor appears.
pub fn factor(x: U128) -> Vec<(U128, u32)> {
    if x.is_zero() || x.is_unit() || x.is_overflow() {
        return vec![(x, 1)];
    }
    let mut x = x.abs();
    let mut result = vec![];
    {
        let (p, i) = div_by_q(&mut x, 2);
        if i > 0 {
            push_factor(&mut result, p, i);
        }
        if x < U128::from(2) {
            sort_factors(&mut result);
            return result;
        }
    }
    for &el in SMALL_PRIMES.iter() {
        let (p, i) = div_by_q(&mut x, el);
        if i > 0 {
            push_factor(&mut result, p, i);
        }
        if x < U128::from(2) {
            sort_factors(&mut result);
            return result;
        }
    }
    fermat_recursive(x, &mut result);
    sort_factors(&mut result);
    result
}

fn fermat_recursive(x: U128, result: &mut Vec<(U128, u32)>) {
    let (a, b) = fermat_method(x);
    if a.is_unit() {
        push_factor(result, b, 1);
        return;
    }
    if b.is_unit() {
        push_factor(result, a, 1);
        return;
    }
    fermat_recursive(a, result);
    fermat_recursive(b, result);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fbase::is_prime;

    fn check_factors(factors: &[(U128, u32)], x: U128) {
        let mut product = U128::one();
        for &(p, i) in factors {
            for _ in 0..i {
                product = product * p;
            }
        }
        assert_eq!(product, x, "factors of {} reassemble", x);
        for &(p, _) in factors {
            assert!(is_prime(p), "{} is prime", p);
        }
    }

    fn as_pairs(factors: &[(U128, u32)]) -> Vec<(u64, u32)> {
        factors.iter().map(|&(p, i)| (p.low, i)).collect()
    }

    #[test]
    fn test_fermat_method() {
        // 21 = 25 - 4 at k = 1.
        let (a, b) = fermat_method(U128::from(21));
        assert_eq!((a.low, b.low), (3, 7));
        // Perfect square.
        let (a, b) = fermat_method(U128::from(625));
        assert_eq!((a.low, b.low), (25, 25));
        // Prime input exhausts the scan.
        let (a, b) = fermat_method(U128::from(113));
        assert_eq!((a.low, b.low), (113, 1));
        // Semiprime with distant factors.
        let (a, b) = fermat_method(U128::from(1129 * 7823));
        assert_eq!(a * b, U128::from(1129 * 7823));
        assert!(!a.is_unit() && !b.is_unit());
    }

    #[test]
    fn test_factor_mixed() {
        let x = U128::from(1129) * U128::from(7823) * U128::from(8) * U128::from(81)
            * U128::from(3);
        let factors = factor(x);
        assert_eq!(as_pairs(&factors), vec![(2, 3), (3, 5), (1129, 1), (7823, 1)]);
        check_factors(&factors, x);
    }

    #[test]
    fn test_factor_powers() {
        let factors = factor(U128::from(625));
        assert_eq!(as_pairs(&factors), vec![(5, 4)]);
        let factors = factor(U128::from(81));
        assert_eq!(as_pairs(&factors), vec![(3, 4)]);
        let x = U128::from(625 * 81);
        let factors = factor(x);
        assert_eq!(as_pairs(&factors), vec![(3, 4), (5, 4)]);
        check_factors(&factors, x);
    }

    #[test]
    fn test_factor_prime() {
        assert_eq!(as_pairs(&factor(U128::from(113))), vec![(113, 1)]);
        assert_eq!(as_pairs(&factor(U128::from(2))), vec![(2, 1)]);
    }

    #[test]
    fn test_factor_trivial() {
        assert_eq!(as_pairs(&factor(U128::zero())), vec![(0, 1)]);
        assert_eq!(as_pairs(&factor(U128::one())), vec![(1, 1)]);
        // Negative inputs factor by magnitude.
        assert_eq!(as_pairs(&factor(-U128::from(12))), vec![(2, 2), (3, 1)]);
    }

    #[test]
    fn test_factor_acceleration() {
        // The smallest factor is tiny compared to sqrt(x): the odd-k
        // divisibility shortcut finds it long before the square does.
        let x = U128::from(2) * U128::from(1117) * U128::from(2147483647);
        let factors = factor(x);
        assert_eq!(
            as_pairs(&factors),
            vec![(2, 1), (1117, 1), (2147483647, 1)]
        );
        check_factors(&factors, x);
    }
}
