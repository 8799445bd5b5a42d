// Copyright 2023 Rémy Oudompheng. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Stress and regression driver.
//!
//! Usage: wideqs [N] [SELECTOR]
//!
//! N is the number of outer iterations per stress group (default 3).
//! SELECTOR is a bitmask of test groups (default 16):
//!   0x01  u128 division against the oracle
//!   0x02  isqrt against the oracle
//!   0x04  Fermat factorization
//!   0x08  u256 division against the oracle
//!   0x10  u512 division against the oracle
//!   0x20  quadratic residues, GF(2) solver, quadratic sieve
//!   0x40  u256 extending multiplication against the oracle
//!
//! Exits non-zero on the first failed check.

use std::process;

use bitvec_simd::BitVec;
use rand::rngs::ThreadRng;
use rand::Rng;

use wideqs::u128::U128;
use wideqs::wide::{Half, Wide};
use wideqs::{arith, fbase, fermat, matrix, oracle, qsieve};
use wideqs::U256;

const INTERNAL_STEP: u64 = 1 << 12;

/// Boundary-heavy operand pool for the semi-random phases.
const CHOICE: [u64; 31] = [
    0,
    1,
    2,
    3,
    4,
    5,
    6,
    7,
    8,
    9,
    10,
    65535,
    65534,
    65533,
    65532,
    65531,
    65530,
    16384,
    16383,
    16382,
    16385,
    16386,
    16387,
    16388,
    u64::MAX,
    u64::MAX - 1,
    u64::MAX - 2,
    u64::MAX - 3,
    u64::MAX - 4,
    u64::MAX - 5,
    u64::MAX - 6,
];

fn main() {
    let arg = arguments::parse(std::env::args()).unwrap();
    let n = arg
        .orphans
        .first()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(3);
    let selector = arg
        .orphans
        .get(1)
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(16);
    {
        // A worked example of dividing two 128-bit numbers.
        let z1 = U128::new(345, 47); // 47*2^64 + 345
        let z2 = U128::new(6632, 3); // 3*2^64 + 6632
        let (q, r) = z1.divmod(z2);
        println!("Example: {z1} / {z2} = {q}, remainder: {r}");
    }
    if selector & 0x1 != 0 {
        eprintln!("Running semi-random u128 division stress...");
        stress_division_u128(n, true);
        eprintln!("Ok");
        eprintln!("Running random u128 division stress...");
        stress_division_u128(n, false);
        eprintln!("Ok");
    }
    if selector & 0x2 != 0 {
        eprintln!("Running semi-random isqrt stress...");
        stress_isqrt(n, true);
        eprintln!("Ok");
        eprintln!("Running random isqrt stress...");
        stress_isqrt(n, false);
        eprintln!("Ok");
    }
    if selector & 0x4 != 0 {
        eprintln!("Running Fermat factorization tests...");
        fermat_group();
        eprintln!("Ok");
    }
    if selector & 0x8 != 0 {
        eprintln!("Running u256 division stress...");
        stress_division_wide::<U128>(n, "u256");
        eprintln!("Ok");
    }
    if selector & 0x10 != 0 {
        eprintln!("Running u512 division stress...");
        stress_division_wide::<U256>(n, "u512");
        eprintln!("Ok");
    }
    if selector & 0x20 != 0 {
        eprintln!("Running quadratic residue / solver / sieve tests...");
        qs_group();
        eprintln!("Ok");
    }
    if selector & 0x40 != 0 {
        eprintln!("Running u256 extending multiplication stress...");
        stress_mult_ext(n);
        eprintln!("Ok");
    }
}

fn fail(msg: String) -> ! {
    eprintln!("FAILED: {msg}");
    process::exit(1);
}

fn pick(rng: &mut ThreadRng, semi: bool) -> u64 {
    if semi {
        CHOICE[rng.gen_range(0..CHOICE.len())]
    } else {
        rng.gen()
    }
}

fn rand_u128(rng: &mut ThreadRng, semi: bool, signed: bool) -> U128 {
    U128 {
        low: pick(rng, semi),
        high: pick(rng, semi),
        sign: signed && rng.gen(),
        overflow: false,
    }
}

fn stress_division_u128(n: u64, semi: bool) {
    let mut rng = rand::thread_rng();
    for block in 1..=n {
        for _ in 0..INTERNAL_STEP {
            let x = rand_u128(&mut rng, semi, true);
            let y = rand_u128(&mut rng, semi, true);
            if y.low == 0 && y.high == 0 {
                continue;
            }
            let (q, r) = x.divmod(y);
            let expected = oracle::floor_div(&x.to_string(), &y.to_string());
            if q.to_string() != expected {
                fail(format!("{x} / {y} = {q}, reference {expected}"));
            }
            // The remainder is reported against the divisor magnitude:
            // x = q*y + sgn(y)*r with 0 <= r < |y|.
            let r_adj = if y.is_negative() { -r } else { r };
            if q * y + r_adj != x || !(r.abs() < y.abs()) || !r.is_non_negative() {
                fail(format!("{x} / {y}: bad remainder {r}"));
            }
        }
        eprintln!("... u128 division: block {block} of {n}");
    }
}

fn stress_isqrt(n: u64, semi: bool) {
    let mut rng = rand::thread_rng();
    for block in 1..=n {
        for _ in 0..INTERNAL_STEP {
            let x = rand_u128(&mut rng, semi, false);
            let (root, exact) = arith::isqrt(x);
            let expected = oracle::isqrt(&x.to_string());
            if root.to_string() != expected {
                fail(format!("isqrt({x}) = {root}, reference {expected}"));
            }
            if exact != (root * root == x) {
                fail(format!("isqrt({x}): wrong exactness flag"));
            }
        }
        eprintln!("... isqrt: block {block} of {n}");
    }
}

fn check_factors(factors: &[(U128, u32)], x: U128) {
    let mut product = U128::one();
    for &(p, i) in factors {
        for _ in 0..i {
            product = product * p;
        }
        if !fbase::is_prime(p) {
            fail(format!("factor {p} of {x} is not prime"));
        }
    }
    if product != x {
        fail(format!("factors of {x} multiply to {product}"));
    }
}

fn fermat_group() {
    let cases = [
        U128::from(1129) * U128::from(7823) * U128::from(8) * U128::from(81) * U128::from(3),
        U128::from(625),
        U128::from(625) * U128::from(81),
        U128::from(81),
        U128::from(113),
        U128::from(199933) * U128::from(999331) * U128::from(113),
        U128::from(199933) * U128::from(999331) * U128::from(9311),
        U128::from(106033) * U128::from(13669) * U128::from(3085553) * U128::from(2269),
    ];
    for x in cases {
        let factors = fermat::factor(x);
        let mut line = format!("x = {x}, factors: {{");
        for (c, (p, i)) in factors.iter().enumerate() {
            if c > 0 {
                line.push_str(", ");
            }
            line.push_str(&format!("({p}, {i})"));
        }
        line.push('}');
        println!("{line}");
        check_factors(&factors, x);
    }
}

fn rand_wide<H: Half>(rng: &mut ThreadRng) -> Wide<H> {
    let words = <Wide<H> as Half>::BITS / 64;
    let mut v = Wide::<H>::zero();
    for _ in 0..words {
        v = (v << 64) | Wide::<H>::from_digit(rng.gen());
    }
    v.sign = rng.gen();
    v
}

fn stress_division_wide<H: Half>(n: u64, label: &str) {
    let mut rng = rand::thread_rng();
    for block in 1..=n {
        for _ in 0..INTERNAL_STEP {
            let x = rand_wide::<H>(&mut rng);
            let mut y = rand_wide::<H>(&mut rng);
            if y.low.is_zero() && y.high.is_zero() {
                y = Wide::one();
            }
            let (q, r) = x.divmod(y);
            let expected = oracle::floor_div(&x.to_string(), &y.to_string());
            if q.to_string() != expected {
                fail(format!("{label}: {x} / {y} = {q}, reference {expected}"));
            }
            let r_adj = if y.is_negative() { -r } else { r };
            if q * y + r_adj != x || !(r.abs() < y.abs()) || !r.is_non_negative() {
                fail(format!("{label}: {x} / {y}: bad remainder {r}"));
            }
        }
        eprintln!("... {label} division: block {block} of {n}");
    }
}

fn qs_group() {
    // Squares modulo 7 are {0, 1, 2, 4}.
    for (x, qr) in [(0u64, true), (2, true), (3, false), (5, false)] {
        if fbase::is_quadratic_residue(U128::from(x), U128::from(7)) != qr {
            fail(format!("quadratic residue {x} mod 7"));
        }
    }
    let (r1, r2) = fbase::sqrt_mod(U128::from(2), U128::from(7));
    if r1 + r2 != U128::from(7) {
        fail("sqrt_mod(2, 7)".into());
    }
    // A dependent system has a null-space combination.
    let rows = vec![
        BitVec::from([true, false, true].iter().copied()),
        BitVec::from([false, true, true].iter().copied()),
        BitVec::from([true, true, false].iter().copied()),
    ];
    let kernel = matrix::null_space(rows);
    if kernel != vec![vec![0, 1, 2]] {
        fail(format!("solver kernel {kernel:?}"));
    }
    // The textbook sieve input.
    let factors = qsieve::factor_qs(U128::from(15347), 200, 8);
    println!(
        "factor_qs(15347) = {:?}",
        factors
            .iter()
            .map(|&(p, i)| (p.low, i))
            .collect::<Vec<_>>()
    );
    if factors.len() != 2
        || factors[0] != (U128::from(103), 1)
        || factors[1] != (U128::from(149), 1)
    {
        fail("factor_qs(15347, 200, 8)".into());
    }
    check_factors(&factors, U128::from(15347));
}

fn stress_mult_ext(n: u64) {
    let mut rng = rand::thread_rng();
    for block in 1..=n {
        for _ in 0..INTERNAL_STEP {
            let a = rand_u128(&mut rng, false, false);
            let b = rand_u128(&mut rng, false, false);
            let p = U256::mult_ext(a, b);
            let expected = oracle::mul(&a.to_string(), &b.to_string());
            if p.to_string() != expected {
                fail(format!("mult_ext({a}, {b}) = {p}, reference {expected}"));
            }
            if p.is_singular() {
                fail(format!("mult_ext({a}, {b}) went singular"));
            }
        }
        eprintln!("... u256 mult_ext: block {block} of {n}");
    }
}
