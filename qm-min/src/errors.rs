// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

/// An error returned while validating a [`Problem`](crate::problem::Problem).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvalidProblem {
    #[error("at least one minterm is required")]
    NoMinterms,

    #[error("variable count {count} must be in range 1..={max}")]
    VariableCountOutOfRange { count: usize, max: usize },

    #[error("minterm {minterm} doesn't fit in {variable_count} variable(s)")]
    MintermOutOfRange { minterm: u32, variable_count: usize },
}

/// An error returned while parsing a [`Pattern`](crate::pattern::Pattern).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvalidPattern {
    #[error("pattern is empty")]
    Empty,

    #[error("pattern has {len} positions, at most {max} are supported")]
    TooLong { len: usize, max: usize },

    #[error("invalid character {ch:?} at position {position} (expected 0, 1 or -)")]
    InvalidChar { ch: char, position: usize },
}

/// Karnaugh maps are only drawn for 2 to 5 variables.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("Karnaugh maps are drawn for 2 to 5 variables, not {variable_count}")]
pub struct KarnaughUnsupported {
    pub variable_count: usize,
}
