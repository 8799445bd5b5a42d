// Copyright 2023 Rémy Oudompheng. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Arithmetic utilities over the 128-bit base type: integer square root,
//! GCD, small powers.

use crate::u128::U128;

/// Largest r with r*r <= x, and whether r*r == x exactly.
///
/// Newton iteration r <- (r + x/r)/2 seeded above the root (2^64 for wide
/// inputs, 2^32 otherwise) so the sequence decreases. Near the root the
/// iteration can enter a two-cycle between r and r+1; the last two
/// estimates are tracked and the smaller one is the answer.
pub fn isqrt(x: U128) -> (U128, bool) {
    if x.is_overflow() {
        return (x, false);
    }
    let x = x.abs();
    if x.is_zero() {
        return (U128::zero(), true);
    }
    let wide_seed = U128::new(0, 1); // 2^64
    let mut result = if x >= wide_seed {
        wide_seed
    } else {
        U128::new(1 << 32, 0)
    };
    let mut prev = x;
    let mut prevprev;
    loop {
        prevprev = prev;
        prev = result;
        let (tmp, remainder) = x.divmod(result);
        result = (result + tmp).divmod_digit(2).0;
        if result == prev {
            let exact = tmp == prev && remainder.is_zero();
            return (result, exact);
        }
        if result == prevprev {
            // Two-cycle: the estimates oscillate around the root from
            // above, so the previous (smaller) one is it.
            return (prev, false);
        }
    }
}

/// Euclidean GCD.
pub fn gcd(mut x: U128, mut y: U128) -> U128 {
    if x.is_overflow() {
        return x;
    }
    if y.is_overflow() {
        return y;
    }
    if x == y {
        return x;
    }
    if x > y {
        while !y.is_zero() {
            let y_copy = y;
            y = x.divmod(y).1;
            x = y_copy;
        }
        x
    } else {
        while !x.is_zero() {
            let x_copy = x;
            x = y.divmod(x).1;
            y = x_copy;
        }
        y
    }
}

/// x^y by repeated multiplication. Overflow shows up as a singular result.
pub fn int_power(x: u64, y: u32) -> U128 {
    let mut result = U128::one();
    for _ in 0..y {
        result = result * x;
    }
    result
}

/// Number of decimal digits, at least 1.
pub fn num_of_digits(mut x: U128) -> u32 {
    let mut i = 0;
    while !x.is_zero() {
        x = x.div10();
        i += 1;
    }
    if i == 0 {
        1
    } else {
        i
    }
}

/// Divide x by q as many times as it goes. Returns q as a number and the
/// number of successful divisions; x keeps the cofactor.
pub fn div_by_q(x: &mut U128, q: u64) -> (U128, u32) {
    let divisor = U128::from(q);
    let (mut tmp, mut remainder) = x.divmod(divisor);
    let mut i = 0;
    while remainder.is_zero() {
        i += 1;
        *x = tmp;
        (tmp, remainder) = x.divmod(divisor);
    }
    (divisor, i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isqrt_small() {
        for (x, root, exact) in [
            (0u64, 0u64, true),
            (1, 1, true),
            (2, 1, false),
            (3, 1, false),
            (4, 2, true),
            (8, 2, false),
            (9, 3, true),
            (15, 3, false),
            (16, 4, true),
            (15346, 123, false),
            (15347, 123, false),
            (1 << 62, 1 << 31, true),
        ] {
            let (r, e) = isqrt(U128::from(x));
            assert_eq!(r, U128::from(root), "isqrt({})", x);
            assert_eq!(e, exact, "isqrt({}) exactness", x);
        }
    }

    #[test]
    fn test_isqrt_wide() {
        // (2^64 + 3)^2 and neighbours.
        let n = U128::new(3, 1);
        let sq = n * n;
        let (r, e) = isqrt(sq);
        assert!(e);
        assert_eq!(r, n);
        let (r, e) = isqrt(sq - U128::one());
        assert!(!e);
        assert_eq!(r, n - U128::one());
        let (r, e) = isqrt(sq + U128::one());
        assert!(!e);
        assert_eq!(r, n);
        // Contract r^2 <= x < (r+1)^2 on assorted values.
        for x in [
            U128::new(12345, 99),
            U128::new(0, u64::MAX),
            U128::new(123, u64::MAX - 1),
        ] {
            let (r, e) = isqrt(x);
            assert!(r * r <= x);
            assert!(x < (r + U128::one()) * (r + U128::one()));
            assert_eq!(e, r * r == x);
        }
        // At the very top of the range (r+1)^2 does not fit anymore.
        let (r, e) = isqrt(U128::max_unsigned());
        assert_eq!(r, U128::new(u64::MAX, 0));
        assert!(!e);
        assert!(r * r <= U128::max_unsigned());
    }

    #[test]
    fn test_gcd() {
        let g = gcd(U128::from(12 * 35), U128::from(12 * 22));
        assert_eq!(g, U128::from(12));
        assert_eq!(gcd(U128::from(17), U128::from(5)), U128::one());
        assert_eq!(gcd(U128::from(100), U128::from(100)), U128::from(100));
        assert_eq!(gcd(U128::zero(), U128::from(9)), U128::from(9));
        let wide = U128::new(0, 6); // 6 * 2^64
        assert_eq!(gcd(wide, U128::from(4)), U128::from(4));
    }

    #[test]
    fn test_int_power() {
        assert_eq!(int_power(2, 10), U128::from(1024));
        assert_eq!(int_power(10, 19).to_string(), "10000000000000000000");
        assert_eq!(int_power(7, 0), U128::one());
        assert!(int_power(2, 128).is_overflow());
    }

    #[test]
    fn test_num_of_digits() {
        assert_eq!(num_of_digits(U128::zero()), 1);
        assert_eq!(num_of_digits(U128::from(7)), 1);
        assert_eq!(num_of_digits(U128::from(10)), 2);
        assert_eq!(num_of_digits(U128::max_unsigned()), 39);
    }

    #[test]
    fn test_div_by_q() {
        let mut x = U128::from(3 * 3 * 3 * 5 * 7);
        let (p, i) = div_by_q(&mut x, 3);
        assert_eq!(p, U128::from(3));
        assert_eq!(i, 3);
        assert_eq!(x, U128::from(35));
        let (_, i) = div_by_q(&mut x, 11);
        assert_eq!(i, 0);
        assert_eq!(x, U128::from(35));
    }
}
