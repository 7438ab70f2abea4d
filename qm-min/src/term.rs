// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::bits::{bit_position, ones_count};
use itertools::Itertools;
use std::fmt;

/// A cube: a single minterm, or a group of minterms merged over one or more don't-care bits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Term {
    indexes: Vec<u32>,
    // Bit positions, sorted ascending. Position p stands for the value 2^p.
    free_bits: Vec<u32>,
    consumed: bool,
}

impl Term {
    /// Creates an unmerged term for a single minterm.
    #[inline]
    pub fn minterm(index: u32) -> Self {
        Self {
            indexes: vec![index],
            free_bits: Vec::new(),
            consumed: false,
        }
    }

    /// The minterm indexes covered by this term, strictly ascending.
    #[inline]
    pub fn indexes(&self) -> &[u32] {
        &self.indexes
    }

    /// The don't-care bit positions of this term, ascending.
    #[inline]
    pub fn free_bits(&self) -> &[u32] {
        &self.free_bits
    }

    /// Returns true once this term has been merged into a larger term.
    #[inline]
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    #[inline]
    pub(crate) fn mark_consumed(&mut self) {
        self.consumed = true;
    }

    /// The smallest minterm covered by this term. All don't-care bits are 0 in it.
    #[inline]
    pub fn min_index(&self) -> u32 {
        self.indexes[0]
    }

    /// The number of 1 bits among the fixed (non-don't-care) positions.
    #[inline]
    pub fn ones(&self) -> u32 {
        ones_count(self.min_index())
    }

    #[inline]
    pub fn covers(&self, index: u32) -> bool {
        self.indexes.binary_search(&index).is_ok()
    }

    /// Returns the structural identity of this term, ignoring the consumed flag.
    pub fn key(&self) -> TermKey {
        TermKey {
            indexes: self.indexes.clone(),
            free_bits: self.free_bits.clone(),
        }
    }

    /// If `upper` is this term shifted by a single power of two, returns the bit position of
    /// that power.
    ///
    /// Both index lists must have the same length, and `upper.indexes[i] - self.indexes[i]` must
    /// be the same power of two for every `i`.
    pub fn difference(&self, upper: &Term) -> Option<u32> {
        if self.indexes.len() != upper.indexes.len() {
            return None;
        }
        let diff = upper.min_index().checked_sub(self.min_index())?;
        let position = bit_position(diff)?;
        self.indexes
            .iter()
            .zip(&upper.indexes)
            .all(|(&lo, &hi)| hi.checked_sub(lo) == Some(diff))
            .then(|| position)
    }

    /// Merges this term with `upper`, a term from the next popcount group.
    ///
    /// Returns `None` if the two terms can't be merged. Neither term is marked consumed; that's
    /// up to the collection that owns them.
    pub fn merge(&self, upper: &Term) -> Option<Term> {
        let position = self.difference(upper)?;

        let indexes: Vec<u32> = self
            .indexes
            .iter()
            .merge(&upper.indexes)
            .copied()
            .collect();
        assert!(
            indexes.iter().tuple_windows().all(|(a, b)| a < b),
            "merging {} with {} produced indexes that aren't strictly ascending: {:?}",
            self,
            upper,
            indexes
        );

        let free_bits: Vec<u32> = self
            .free_bits
            .iter()
            .merge(&upper.free_bits)
            .merge(std::iter::once(&position))
            .copied()
            .dedup()
            .collect();

        Some(Term {
            indexes,
            free_bits,
            consumed: false,
        })
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.indexes.iter().join(","))?;
        if !self.free_bits.is_empty() {
            write!(
                f,
                " ({})",
                self.free_bits.iter().map(|&bit| 1_u32 << bit).join(",")
            )?;
        }
        Ok(())
    }
}

/// The structural identity of a [`Term`]: its sorted indexes and sorted don't-care bits.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermKey {
    pub indexes: Vec<u32>,
    pub free_bits: Vec<u32>,
}
