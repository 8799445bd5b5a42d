// Copyright 2023 Rémy Oudompheng. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! The classical quadratic sieve over a window of (r+i)^2 - x values.
//!
//! A relation (r+i)^2 = product of factor base primes mod x gives a row
//! of exponent parities; a null-space combination of rows multiplies to
//! a congruence of squares A^2 = B^2 mod x and gcd(A - B, x) has a good
//! chance of being a proper factor.
//!
//! Bibliography:
//! Carl Pomerance, A Tale of Two Sieves
//! https://www.ams.org/notices/199612/pomerance.pdf

use bitvec_simd::BitVec;

use crate::arith::{gcd, isqrt};
use crate::fbase::{select_factor_base, sqrt_mod};
use crate::fermat::{push_factor, sort_factors};
use crate::matrix;
use crate::u128::U128;

/// Factor x into prime powers with the quadratic sieve.
///
/// `sieve_size` is the window length and `factor_base` the number of
/// primes; both must be positive or the result is empty. The loop keeps
/// a running quotient in x and the last divisor in a carrier y, dividing
/// out every factor the sieve produces; a value the sieve cannot split
/// is reported as prime.
pub fn factor_qs(x: U128, sieve_size: usize, factor_base: usize) -> Vec<(U128, u32)> {
    let mut result = vec![];
    if sieve_size == 0 || factor_base == 0 {
        return result;
    }
    let mut x = x;
    let mut y = U128::one();
    loop {
        let divisor1 = find_a_divisor(x, sieve_size, factor_base);
        let divisor2 = find_a_divisor(y, sieve_size, factor_base);
        if divisor1.is_unit() && divisor2.is_unit() {
            break;
        }
        if divisor2 == y && !divisor2.is_unit() {
            push_factor(&mut result, y, 1);
        }
        if divisor1 == x && !divisor1.is_unit() {
            push_factor(&mut result, x, 1);
            y = U128::one();
        } else {
            y = divisor1;
        }
        x = x.divmod(divisor1).0;
    }
    sort_factors(&mut result);
    result
}

/// One round of sieving: returns a non-trivial divisor of x, or x itself
/// when none of the null-space combinations produces one.
fn find_a_divisor(x: U128, sieve_size: usize, factor_base: usize) -> U128 {
    if x.is_zero() || x.is_unit() {
        return x;
    }
    let base = select_factor_base(x, factor_base);
    let (mut x_sqrt, exact) = isqrt(x);
    if !exact {
        x_sqrt = x_sqrt + U128::one();
    }
    // The polynomial window (r+i)^2 - x for i in [0, sieve_size).
    let mut sieve = Vec::with_capacity(sieve_size);
    let mut ii = U128::zero();
    for _ in 0..sieve_size {
        let t = ii + x_sqrt;
        sieve.push(t * t - x);
        ii = ii + U128::one();
    }
    let sieve_original = sieve.clone();
    for &modulo in &base {
        let (r1, r2) = sqrt_mod(x, modulo);
        let root_1 = reduce_root(r1 - x_sqrt, modulo);
        let root_2 = reduce_root(r2 - x_sqrt, modulo);
        divide_out(&mut sieve, root_1, modulo);
        if root_1 != root_2 {
            divide_out(&mut sieve, root_2, modulo);
        }
    }
    // A position fully divided down to 1 is smooth over the base.
    let smooth_indices: Vec<usize> = (0..sieve.len())
        .filter(|&i| sieve[i].is_unit())
        .collect();
    // Exponent parity matrix, from the original window values.
    let mut rows = vec![];
    let mut sieve_reduced = vec![];
    for &index in &smooth_indices {
        let value = sieve_original[index];
        let mut row = BitVec::zeros(base.len());
        for (j, &modulo) in base.iter().enumerate() {
            if value.divmod(modulo).1.is_zero() {
                row.set(j, true);
            }
        }
        rows.push(row);
        sieve_reduced.push(value);
    }
    for indices in matrix::null_space(rows) {
        // A is the product of the sieved arguments, B the square root of
        // the combined smooth parts.
        let mut a = U128::one();
        let mut b_exponents = vec![0u32; base.len()];
        for &it in &indices {
            let index = smooth_indices[it];
            let value = sieve_reduced[it];
            a = a * (x_sqrt + U128::from(index as u64));
            for (j, &modulo) in base.iter().enumerate() {
                if value.divmod(modulo).1.is_zero() {
                    b_exponents[j] += 1;
                }
            }
        }
        let mut b = U128::one();
        for (j, &modulo) in base.iter().enumerate() {
            let mut tmp = U128::one();
            for _ in 0..b_exponents[j] / 2 {
                tmp = tmp * modulo;
            }
            b = b * tmp;
        }
        // A singular A (the combination overflowed 128 bits) falls out
        // here: gcd propagates the tag and the range check rejects it.
        let c = a - b;
        let g = gcd(c.abs(), x);
        if g < x && g > U128::one() {
            return g;
        }
    }
    x
}

/// Bring a sieve root offset into [0, p).
fn reduce_root(mut root: U128, modulo: U128) -> U128 {
    if root.is_negative() {
        let delta = root.abs().divmod(modulo).0;
        root = root + delta * modulo;
    }
    if root.is_negative() {
        root = root + modulo;
    }
    root
}

/// Divide every window position on the root's residue class by p as long
/// as it goes.
fn divide_out(sieve: &mut [U128], root: U128, modulo: U128) {
    let step = modulo.low as usize;
    let mut idx = root.low as usize;
    while idx < sieve.len() {
        loop {
            if sieve[idx].is_zero() {
                break;
            }
            let (q, r) = sieve[idx].divmod(modulo);
            if !r.is_zero() {
                break;
            }
            sieve[idx] = q;
        }
        idx += step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_pairs(factors: &[(U128, u32)]) -> Vec<(u64, u32)> {
        factors.iter().map(|&(p, i)| (p.low, i)).collect()
    }

    #[test]
    fn test_factor_qs_semiprime() {
        // 15347 = 103 * 149, the classical textbook example.
        let factors = factor_qs(U128::from(15347), 200, 8);
        assert_eq!(as_pairs(&factors), vec![(103, 1), (149, 1)]);
    }

    #[test]
    fn test_factor_qs_degenerate() {
        assert!(factor_qs(U128::from(15347), 0, 8).is_empty());
        assert!(factor_qs(U128::from(15347), 200, 0).is_empty());
        assert!(factor_qs(U128::one(), 200, 8).is_empty());
    }

    #[test]
    fn test_factor_qs_prime() {
        // The sieve cannot split a prime; it is reported as-is.
        let factors = factor_qs(U128::from(149), 100, 6);
        assert_eq!(as_pairs(&factors), vec![(149, 1)]);
    }

    #[test]
    fn test_find_divisor_products() {
        let factors = factor_qs(U128::from(103 * 149), 200, 8);
        let mut product = U128::one();
        for &(p, i) in &factors {
            for _ in 0..i {
                product = product * p;
            }
        }
        assert_eq!(product, U128::from(15347));
    }
}
