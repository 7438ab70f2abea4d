// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    chart::{Chart, CoverSolution},
    errors::KarnaughUnsupported,
    kmap::KarnaughDisplay,
    pattern::{ExpressionDisplay, Pattern},
    primes::{ImplicantId, PrimeImplicant, PrimeImplicants},
    problem::Problem,
    rounds::Rounds,
};
use once_cell::sync::OnceCell;

/// Runs the minimization pipeline for one problem.
///
/// Each stage is computed the first time it's asked for, then cached.
#[derive(Clone, Debug)]
pub struct Minimizer {
    problem: Problem,
    cache: MinimizerCache,
}

impl Minimizer {
    pub fn new(problem: Problem) -> Self {
        Self {
            problem,
            cache: MinimizerCache::default(),
        }
    }

    #[inline]
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// Every merge round, starting with the minterms grouped by popcount.
    pub fn rounds(&self) -> &Rounds {
        self.cache.rounds.get_or_init(|| {
            Rounds::merge(self.problem.variable_count(), self.problem.minterms())
        })
    }

    pub fn prime_implicants(&self) -> &PrimeImplicants {
        self.cache
            .primes
            .get_or_init(|| PrimeImplicants::extract(self.rounds()))
    }

    /// Builds a fresh prime implicant chart.
    #[inline]
    pub fn chart(&self) -> Chart {
        Chart::build(self.prime_implicants())
    }

    pub fn solution(&self) -> &CoverSolution {
        self.cache.solution.get_or_init(|| self.chart().solve())
    }

    /// The selected implicants' identifiers, in the order they were selected.
    #[inline]
    pub fn cover(&self) -> &[ImplicantId] {
        self.solution().cover()
    }

    /// The selected implicants, in the order they were selected.
    pub fn selected_implicants(&self) -> impl Iterator<Item = &PrimeImplicant> + '_ {
        let primes = self.prime_implicants();
        self.cover().iter().filter_map(move |&id| primes.get(id))
    }

    /// The selected implicants as patterns, in the order they were selected.
    pub fn patterns(&self) -> &[Pattern] {
        self.cache.patterns.get_or_init(|| {
            self.prime_implicants()
                .patterns(self.cover(), self.problem.variable_count())
        })
    }

    /// The selected implicants as strings over `0`, `1` and `-`.
    pub fn encoded(&self) -> Vec<String> {
        self.patterns()
            .iter()
            .map(|pattern| pattern.to_string())
            .collect()
    }

    /// Displays the minimized function as a sum of products.
    #[inline]
    pub fn expression_display(&self) -> ExpressionDisplay<'_> {
        ExpressionDisplay::new(self.patterns())
    }

    #[inline]
    pub fn karnaugh_display(&self) -> Result<KarnaughDisplay<'_>, KarnaughUnsupported> {
        KarnaughDisplay::new(self)
    }
}

#[derive(Clone, Debug, Default)]
struct MinimizerCache {
    rounds: OnceCell<Rounds>,
    primes: OnceCell<PrimeImplicants>,
    solution: OnceCell<CoverSolution>,
    patterns: OnceCell<Vec<Pattern>>,
}
