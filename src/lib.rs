// Copyright 2023 Rémy Oudompheng. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Fixed-width wide integers by recursive doubling, with Fermat and
//! quadratic sieve factorization on top.
//!
//! A width-W number is a pair of width-W/2 halves plus a sign bit; the
//! base case is [`u128::U128`] made of two machine words. Doubling is
//! free: [`U256`] is `Wide<U128>`, [`U512`] is `Wide<U256>`, and so on.
//!
//! ```
//! use wideqs::u128::U128;
//!
//! // (47*2^64 + 345) / (3*2^64 + 6632)
//! let z1 = U128::new(345, 47);
//! let z2 = U128::new(6632, 3);
//! let (q, r) = z1.divmod(z2);
//! assert_eq!(q.to_string(), "15");
//! assert_eq!(q * z2 + r, z1);
//! ```

pub mod arith;
pub mod fbase;
pub mod fermat;
pub mod matrix;
pub mod oracle;
pub mod qsieve;
pub mod u128;
pub mod wide;

pub use crate::u128::U128;
pub use crate::wide::{Half, Singular, Wide};

/// 256-bit number: two 128-bit halves.
pub type U256 = Wide<U128>;
/// 512-bit number: two 256-bit halves.
pub type U512 = Wide<U256>;
/// 1024-bit number, one more doubling.
pub type U1024 = Wide<U512>;
