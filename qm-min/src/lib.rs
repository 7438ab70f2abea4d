// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Minimization of single-output Boolean functions using the Quine-McCluskey method.
//!
//! The pipeline runs in four stages:
//!
//! 1. [`Rounds::merge`](rounds::Rounds::merge) groups minterms by popcount and merges adjacent
//!    groups until nothing merges any more.
//! 2. [`PrimeImplicants::extract`](primes::PrimeImplicants::extract) collects the terms that were
//!    never consumed by a merge.
//! 3. [`Chart::build`](chart::Chart::build) lays the prime implicants out as a coverage chart,
//!    which [`Chart::solve`](chart::Chart::solve) reduces to a cover.
//! 4. [`PrimeImplicants::encode`](primes::PrimeImplicants::encode) renders the selected
//!    implicants as `0`/`1`/`-` patterns.
//!
//! [`Minimizer`](minimizer::Minimizer) ties the stages together.
//!
//! ```
//! use qm_min::problem::Problem;
//!
//! let problem = Problem::new(2, [0, 1, 2, 3]).unwrap();
//! let minimizer = problem.minimize();
//! assert_eq!(minimizer.encoded(), ["--"]);
//! ```

pub mod bits;
pub mod chart;
pub mod errors;
pub mod kmap;
pub mod minimizer;
pub mod pattern;
pub mod primes;
pub mod problem;
#[cfg(any(test, feature = "proptest1"))]
mod proptest_helpers;
pub mod rounds;
pub mod term;

/// The largest supported number of variables. Each variable gets a letter in algebraic display.
pub const MAX_VARIABLES: usize = 26;
