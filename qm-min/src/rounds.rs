// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::term::Term;
use itertools::{Itertools, Position};
use log::{debug, trace};
use std::{
    collections::{BTreeMap, HashSet},
    fmt,
};

/// Terms bucketed by the number of 1 bits in their fixed positions.
///
/// Only non-empty groups are stored. Iteration is in ascending popcount order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Groups(BTreeMap<u32, Vec<Term>>);

impl Groups {
    /// Creates one singleton term per minterm, grouped by popcount.
    pub fn from_minterms(minterms: impl IntoIterator<Item = u32>) -> Self {
        let mut groups = Self::default();
        for index in minterms {
            let term = Term::minterm(index);
            groups.insert(term.ones(), term);
        }
        groups
    }

    /// The number of non-empty groups.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the terms with `ones` 1 bits, if there are any.
    #[inline]
    pub fn get(&self, ones: u32) -> Option<&[Term]> {
        self.0.get(&ones).map(|terms| terms.as_slice())
    }

    /// Iterates over `(popcount, terms)` pairs in ascending popcount order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[Term])> + '_ {
        self.0.iter().map(|(&ones, terms)| (ones, terms.as_slice()))
    }

    /// Iterates over every term in every group.
    pub fn terms(&self) -> impl Iterator<Item = &Term> + '_ {
        self.0.values().flatten()
    }

    fn insert(&mut self, ones: u32, term: Term) {
        self.0.entry(ones).or_default().push(term);
    }

    /// Runs one merge pass: every term in group `k` is compared against every term in group
    /// `k + 1`. Terms that merge are marked consumed in place, and the merged terms are
    /// returned as the next set of groups.
    fn merge_pass(&mut self) -> MergePass {
        let mut pass = MergePass::default();
        let mut seen = HashSet::new();

        let mut buckets: Vec<(u32, &mut Vec<Term>)> =
            self.0.iter_mut().map(|(&ones, terms)| (ones, terms)).collect();

        for ix in 1..buckets.len() {
            let (lower_part, upper_part) = buckets.split_at_mut(ix);
            let (lower_ones, lower) = &mut lower_part[ix - 1];
            let (upper_ones, upper) = &mut upper_part[0];
            // A power-of-two shift adds exactly one 1 bit to the lowest index, so groups further
            // apart never merge.
            if *lower_ones + 1 != *upper_ones {
                continue;
            }

            for lo in 0..lower.len() {
                for hi in 0..upper.len() {
                    let merged = match lower[lo].merge(&upper[hi]) {
                        Some(merged) => merged,
                        None => continue,
                    };
                    lower[lo].mark_consumed();
                    upper[hi].mark_consumed();
                    pass.merges += 1;
                    trace!("merged {} with {} into {}", lower[lo], upper[hi], merged);

                    debug_assert_eq!(merged.ones(), *lower_ones);
                    if seen.insert(merged.key()) {
                        pass.next.insert(*lower_ones, merged);
                    } else {
                        pass.duplicates += 1;
                    }
                }
            }
        }

        pass
    }
}

#[derive(Debug, Default)]
struct MergePass {
    next: Groups,
    merges: usize,
    duplicates: usize,
}

/// A snapshot of all groups during one merge iteration, with consumed flags as they stood after
/// the iteration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round {
    groups: Groups,
}

impl Round {
    #[inline]
    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    #[inline]
    pub fn terms(&self) -> impl Iterator<Item = &Term> + '_ {
        self.groups.terms()
    }
}

/// Every merge round, from the initial minterm grouping to the last round that produced terms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rounds(Vec<Round>);

impl Rounds {
    /// Repeatedly merges adjacent popcount groups, starting from the given minterms, until no
    /// further merges happen.
    ///
    /// `minterms` must be sorted, free of duplicates, and each below `2^variable_count`.
    ///
    /// ```
    /// use qm_min::rounds::Rounds;
    ///
    /// let rounds = Rounds::merge(2, &[0, 1, 2, 3]);
    /// assert_eq!(rounds.len(), 3);
    /// let last: Vec<_> = rounds.last().terms().map(|term| term.to_string()).collect();
    /// assert_eq!(last, ["0,1,2,3 (1,2)"]);
    /// ```
    pub fn merge(variable_count: usize, minterms: &[u32]) -> Self {
        debug_assert!(
            minterms.iter().tuple_windows().all(|(a, b)| a < b),
            "minterms must be sorted and deduplicated"
        );
        debug_assert!(
            minterms
                .iter()
                .all(|&index| u64::from(index) < 1_u64 << variable_count),
            "minterms must fit in {} variables",
            variable_count
        );

        let mut rounds = Vec::new();
        let mut groups = Groups::from_minterms(minterms.iter().copied());

        loop {
            if groups.len() <= 1 {
                debug!(
                    "round {}: {} group(s), nothing left to compare",
                    rounds.len() + 1,
                    groups.len()
                );
                rounds.push(Round { groups });
                break;
            }

            let pass = groups.merge_pass();
            debug!(
                "round {}: {} group(s), {} merge(s), {} duplicate(s) suppressed",
                rounds.len() + 1,
                groups.len(),
                pass.merges,
                pass.duplicates
            );
            rounds.push(Round { groups });

            if pass.next.is_empty() {
                break;
            }
            groups = pass.next;
        }

        // Every round adds one don't-care bit, so there can't be more than this.
        assert!(
            rounds.len() <= variable_count + 1,
            "{} rounds for {} variables",
            rounds.len(),
            variable_count
        );

        Self(rounds)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Round> {
        self.0.iter()
    }

    /// The final round. There's always at least one.
    #[inline]
    pub fn last(&self) -> &Round {
        self.0.last().expect("merging always produces at least one round")
    }

    /// Iterates over every term of every round, in round order, then group order.
    pub fn terms(&self) -> impl Iterator<Item = &Term> + '_ {
        self.0.iter().flat_map(|round| round.terms())
    }
}

impl<'a> IntoIterator for &'a Rounds {
    type Item = &'a Round;
    type IntoIter = std::slice::Iter<'a, Round>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---
// Displayers
// ---

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for group in self.groups.iter().with_position() {
            let ((ones, terms), last) = match group {
                Position::First(group) | Position::Middle(group) => (group, false),
                Position::Last(group) | Position::Only(group) => (group, true),
            };
            writeln!(f, "[{}]", ones)?;
            for term in terms {
                let marker = if term.is_consumed() { '✓' } else { '✗' };
                writeln!(f, "  {} {}", term, marker)?;
            }
            if !last {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Rounds {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (round_ix, round) in self.0.iter().enumerate() {
            if round_ix > 0 {
                writeln!(f)?;
            }
            writeln!(f, "Round {}", round_ix + 1)?;
            write!(f, "{}", round)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indexes(round: &Round) -> Vec<Vec<u32>> {
        round.terms().map(|term| term.indexes().to_vec()).collect()
    }

    #[test]
    fn test_initial_grouping() {
        let groups = Groups::from_minterms([1, 3, 4, 7, 8]);
        let ones: Vec<_> = groups.iter().map(|(ones, terms)| (ones, terms.len())).collect();
        // Groups without members aren't stored.
        assert_eq!(ones, [(1, 3), (2, 1), (3, 1)]);
        assert!(groups.get(0).is_none());
    }

    #[test]
    fn test_single_minterm() {
        let rounds = Rounds::merge(3, &[5]);
        assert_eq!(rounds.len(), 1);
        assert_eq!(indexes(rounds.last()), [vec![5]]);
        assert!(!rounds.last().terms().any(|term| term.is_consumed()));
    }

    #[test]
    fn test_full_collapse() {
        let rounds = Rounds::merge(2, &[0, 1, 2, 3]);
        let all: Vec<_> = rounds.iter().map(indexes).collect();
        assert_eq!(
            all,
            [
                vec![vec![0], vec![1], vec![2], vec![3]],
                // (0,1)+(2,3) and (0,2)+(1,3) produce the same cube, so only one is kept.
                vec![vec![0, 1], vec![0, 2], vec![1, 3], vec![2, 3]],
                vec![vec![0, 1, 2, 3]],
            ]
        );
        assert!(rounds.iter().take(2).all(|round| round.terms().all(Term::is_consumed)));
        assert!(!rounds.last().terms().any(Term::is_consumed));
    }

    #[test]
    fn test_unmergeable_survives() {
        // 0 and 7 are too far apart; 0 and 1 merge.
        let rounds = Rounds::merge(3, &[0, 1, 7]);
        let first = &rounds.iter().next().unwrap();
        let consumed: Vec<_> = first
            .terms()
            .map(|term| (term.min_index(), term.is_consumed()))
            .collect();
        assert_eq!(consumed, [(0, true), (1, true), (7, false)]);
        assert_eq!(rounds.len(), 2);
        assert_eq!(indexes(rounds.last()), [vec![0, 1]]);
    }

    #[test]
    fn test_sparse_groups_not_compared() {
        // 0 is in group 0 and 3 is in group 2; nothing merges and nothing is consumed.
        let rounds = Rounds::merge(2, &[0, 3]);
        assert_eq!(rounds.len(), 1);
        assert!(!rounds.terms().any(Term::is_consumed));
    }

    #[test]
    fn test_round_display() {
        let rounds = Rounds::merge(2, &[0, 1, 3]);
        let expected = "Round 1\n[0]\n  0 ✓\n\n[1]\n  1 ✓\n\n[2]\n  3 ✓\n\n\
                        Round 2\n[0]\n  0,1 (1) ✗\n\n[1]\n  1,3 (2) ✗\n";
        assert_eq!(rounds.to_string(), expected);
    }
}
