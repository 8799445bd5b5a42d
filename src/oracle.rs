// Copyright 2023 Rémy Oudompheng. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Embedded arbitrary-precision reference oracle.
//!
//! Cross-checks for division, square roots and products. Values cross
//! the boundary as decimal strings, so the oracle shares no code with
//! the arithmetic under test: it sees the same text a human would.
//! Used by the stress driver and tests only.

use std::str::FromStr;

use bnum::types::{I1024, U1024};
use num_integer::Integer;

/// Floor division, as a Python `//` would compute it.
pub fn floor_div(x: &str, y: &str) -> String {
    let a = I1024::from_str(x).expect("oracle operand");
    let b = I1024::from_str(y).expect("oracle operand");
    Integer::div_floor(&a, &b).to_string()
}

/// Integer square root of a non-negative value.
pub fn isqrt(x: &str) -> String {
    let a = U1024::from_str(x).expect("oracle operand");
    num_integer::sqrt(a).to_string()
}

/// Exact product.
pub fn mul(x: &str, y: &str) -> String {
    let a = I1024::from_str(x).expect("oracle operand");
    let b = I1024::from_str(y).expect("oracle operand");
    (a * b).to_string()
}
