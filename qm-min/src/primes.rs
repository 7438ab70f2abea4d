// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{pattern::Pattern, rounds::Rounds, term::Term};
use log::debug;
use std::fmt;

/// Identifies a prime implicant within one minimization. Identifiers start at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImplicantId(u32);

impl ImplicantId {
    #[inline]
    pub fn new(id: u32) -> Self {
        assert_ne!(id, 0, "implicant ids start at 1");
        Self(id)
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ImplicantId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// A term that was never merged into a larger term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimeImplicant {
    id: ImplicantId,
    term: Term,
}

impl PrimeImplicant {
    #[inline]
    pub fn id(&self) -> ImplicantId {
        self.id
    }

    #[inline]
    pub fn term(&self) -> &Term {
        &self.term
    }

    #[inline]
    pub fn indexes(&self) -> &[u32] {
        self.term.indexes()
    }

    #[inline]
    pub fn free_bits(&self) -> &[u32] {
        self.term.free_bits()
    }
}

impl fmt::Display for PrimeImplicant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.term)
    }
}

/// The prime implicants of one minimization, in identifier order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrimeImplicants(Vec<PrimeImplicant>);

impl PrimeImplicants {
    /// Collects every term that was never consumed in any round, and numbers them from 1 in
    /// round order.
    pub fn extract(rounds: &Rounds) -> Self {
        let primes: Vec<_> = rounds
            .terms()
            .filter(|term| !term.is_consumed())
            .zip(1..)
            .map(|(term, id)| PrimeImplicant {
                id: ImplicantId::new(id),
                term: term.clone(),
            })
            .collect();
        debug!(
            "{} prime implicant(s) across {} round(s)",
            primes.len(),
            rounds.len()
        );
        Self(primes)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, PrimeImplicant> {
        self.0.iter()
    }

    /// Looks up a prime implicant by identifier.
    #[inline]
    pub fn get(&self, id: ImplicantId) -> Option<&PrimeImplicant> {
        // Identifiers are assigned sequentially from 1.
        self.0.get(id.get() as usize - 1)
    }

    /// Returns the patterns for the selected implicants, in the order they were selected.
    ///
    /// Identifiers that don't belong to this set are skipped.
    pub fn patterns(&self, selected: &[ImplicantId], variable_count: usize) -> Vec<Pattern> {
        selected
            .iter()
            .filter_map(|&id| self.get(id))
            .map(|prime| Pattern::from_term(prime.term(), variable_count))
            .collect()
    }

    /// Renders the selected implicants as strings over `0`, `1` and `-`, most significant bit
    /// first, in the order they were selected.
    ///
    /// ```
    /// use qm_min::{primes::PrimeImplicants, rounds::Rounds};
    ///
    /// let primes = PrimeImplicants::extract(&Rounds::merge(3, &[1, 3, 6]));
    /// let ids: Vec<_> = primes.iter().map(|prime| prime.id()).collect();
    /// assert_eq!(primes.encode(&ids, 3), ["110", "0-1"]);
    /// ```
    pub fn encode(&self, selected: &[ImplicantId], variable_count: usize) -> Vec<String> {
        self.patterns(selected, variable_count)
            .iter()
            .map(|pattern| pattern.to_string())
            .collect()
    }
}

impl<'a> IntoIterator for &'a PrimeImplicants {
    type Item = &'a PrimeImplicant;
    type IntoIter = std::slice::Iter<'a, PrimeImplicant>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(primes: &PrimeImplicants) -> Vec<String> {
        primes.iter().map(|prime| prime.to_string()).collect()
    }

    #[test]
    fn test_extract() {
        // 6 (110) has no partner; 1 and 3 merge.
        let primes = PrimeImplicants::extract(&Rounds::merge(3, &[1, 3, 6]));
        assert_eq!(summary(&primes), ["P1: 6", "P2: 1,3 (2)"]);
    }

    #[test]
    fn test_extract_textbook() {
        let rounds = Rounds::merge(4, &[0, 1, 2, 5, 6, 7, 8, 9, 10, 14]);
        let primes = PrimeImplicants::extract(&rounds);
        assert_eq!(
            summary(&primes),
            [
                "P1: 1,5 (4)",
                "P2: 5,7 (2)",
                "P3: 6,7 (1)",
                "P4: 0,1,8,9 (1,8)",
                "P5: 0,2,8,10 (2,8)",
                "P6: 2,6,10,14 (4,8)",
            ]
        );
        // No term shows up twice.
        let keys: std::collections::HashSet<_> = primes.iter().map(|p| p.term().key()).collect();
        assert_eq!(keys.len(), primes.len());
    }

    #[test]
    fn test_encode_order() {
        let primes = PrimeImplicants::extract(&Rounds::merge(3, &[1, 3, 6]));
        let selected = [ImplicantId::new(2), ImplicantId::new(1)];
        assert_eq!(primes.encode(&selected, 3), ["0-1", "110"]);
        // Unknown identifiers are skipped.
        assert_eq!(primes.encode(&[ImplicantId::new(7)], 3), Vec::<String>::new());
    }
}
