// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{errors::InvalidProblem, minimizer::Minimizer, pattern::variable_name, MAX_VARIABLES};
use itertools::Itertools;
use std::{collections::BTreeSet, fmt};

/// A validated minimization problem: a variable count and the minterms for which the function is
/// true.
///
/// This is the only way into the pipeline, so everything downstream may assume that the minterm
/// list is non-empty, sorted, free of duplicates and in range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Problem {
    variable_count: usize,
    minterms: Vec<u32>,
}

impl Problem {
    /// Creates a new problem. Minterms may be given in any order and may repeat.
    ///
    /// ```
    /// use qm_min::{errors::InvalidProblem, problem::Problem};
    ///
    /// let problem = Problem::new(3, [5, 1, 5]).unwrap();
    /// assert_eq!(problem.minterms(), [1, 5]);
    ///
    /// assert_eq!(
    ///     Problem::new(2, [4]),
    ///     Err(InvalidProblem::MintermOutOfRange { minterm: 4, variable_count: 2 }),
    /// );
    /// ```
    pub fn new(
        variable_count: usize,
        minterms: impl IntoIterator<Item = u32>,
    ) -> Result<Self, InvalidProblem> {
        if !(1..=MAX_VARIABLES).contains(&variable_count) {
            return Err(InvalidProblem::VariableCountOutOfRange {
                count: variable_count,
                max: MAX_VARIABLES,
            });
        }

        let minterms: BTreeSet<u32> = minterms.into_iter().collect();
        if minterms.is_empty() {
            return Err(InvalidProblem::NoMinterms);
        }
        // Sets iterate in ascending order, so only the last element needs checking.
        if let Some(&minterm) = minterms.iter().next_back() {
            if minterm >> variable_count != 0 {
                return Err(InvalidProblem::MintermOutOfRange {
                    minterm,
                    variable_count,
                });
            }
        }

        Ok(Self {
            variable_count,
            minterms: minterms.into_iter().collect(),
        })
    }

    #[inline]
    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    /// The minterms, sorted ascending without duplicates.
    #[inline]
    pub fn minterms(&self) -> &[u32] {
        &self.minterms
    }

    #[inline]
    pub fn contains(&self, index: u32) -> bool {
        self.minterms.binary_search(&index).is_ok()
    }

    /// Returns a minimizer for a copy of this problem.
    #[inline]
    pub fn minimize(&self) -> Minimizer {
        Minimizer::new(self.clone())
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "f({}) = Σm({})",
            (0..self.variable_count).map(variable_name).join(","),
            self.minterms.iter().join(",")
        )
    }
}
