// Copyright 2023 Rémy Oudompheng. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Linear algebra modulo 2.
//!
//! The quadratic sieve produces a matrix whose rows are the exponent
//! parities of smooth relations (columns are factor base primes). A
//! subset of rows xoring to zero multiplies to a square; this module
//! finds all such subsets with Gauss-Jordan elimination on dense bit
//! vectors.

use bitvec_simd::BitVec;

/// Left null-space of the matrix given by `rows`.
///
/// Each returned set lists input row indices whose bitwise XOR is the
/// zero vector. The sets generate the null-space: a full-rank system
/// yields an empty list.
pub fn null_space(rows: Vec<BitVec>) -> Vec<Vec<usize>> {
    let nrows = rows.len();
    if nrows == 0 {
        return vec![];
    }
    let width = rows[0].len();
    assert!(rows.iter().all(|r| r.len() == width));
    let mut work = rows;
    // combos[i] tracks which input rows were folded into work[i]; when a
    // work row empties, its combo is a null-space generator.
    let mut combos: Vec<BitVec> = (0..nrows)
        .map(|i| {
            let mut c = BitVec::zeros(nrows);
            c.set(i, true);
            c
        })
        .collect();
    // For each column, the row that owns its pivot.
    let mut pivot_of: Vec<Option<usize>> = vec![None; width];
    let mut kernel = vec![];
    for i in 0..nrows {
        loop {
            let lead = work[i].leading_zeros();
            if lead >= width {
                kernel.push(combos[i].clone().into_usizes());
                break;
            }
            match pivot_of[lead] {
                Some(j) => {
                    let w = work[j].clone();
                    let c = combos[j].clone();
                    work[i].xor_inplace(&w);
                    combos[i].xor_inplace(&c);
                }
                None => {
                    pivot_of[lead] = Some(i);
                    break;
                }
            }
        }
    }
    kernel
}

#[cfg(test)]
fn make_bitvec(slice: &[u8]) -> BitVec {
    BitVec::from(slice.iter().map(|&n| n != 0))
}

#[test]
fn test_null_space_full_rank() {
    let v = null_space(vec![
        make_bitvec(&[1, 0, 0, 1]),
        make_bitvec(&[0, 1, 0, 1]),
        make_bitvec(&[0, 1, 0, 0]),
        make_bitvec(&[1, 1, 1, 0]),
    ]);
    assert!(v.is_empty());
}

#[test]
fn test_null_space_dependent() {
    // Row 3 is the xor of rows 0..3.
    let v = null_space(vec![
        make_bitvec(&[1, 0, 0, 1]),
        make_bitvec(&[1, 0, 1, 0]),
        make_bitvec(&[1, 1, 1, 0]),
        make_bitvec(&[1, 1, 0, 1]),
    ]);
    assert_eq!(v, vec![vec![0, 1, 2, 3]]);
}

#[test]
fn test_null_space_multiple() {
    // Duplicated rows give one generator each.
    let rows = vec![
        make_bitvec(&[1, 1, 0]),
        make_bitvec(&[1, 1, 0]),
        make_bitvec(&[0, 1, 1]),
        make_bitvec(&[0, 1, 1]),
        make_bitvec(&[1, 0, 0]),
    ];
    let v = null_space(rows.clone());
    assert_eq!(v.len(), 2);
    for combo in &v {
        // Check that the combination actually xors to zero.
        let mut acc = BitVec::zeros(3);
        for &i in combo {
            acc.xor_inplace(&rows[i]);
        }
        assert!(acc.none());
    }
}

#[test]
fn test_null_space_zero_row() {
    let v = null_space(vec![make_bitvec(&[0, 0]), make_bitvec(&[1, 0])]);
    assert_eq!(v, vec![vec![0]]);
}
