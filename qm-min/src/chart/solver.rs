// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{chart::Chart, primes::ImplicantId};
use itertools::Itertools;
use log::debug;
use std::{cmp::Reverse, collections::BTreeSet, fmt};

/// One reduction applied to the chart by [`Chart::solve`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReductionStep {
    /// Rows that were the only cover for some column, added to the cover.
    Essential { selected: Vec<ImplicantId> },
    /// Rows whose columns are a subset of another row's columns, deleted.
    RowDominance { removed: Vec<ImplicantId> },
    /// Columns whose rows are a superset of another column's rows, deleted.
    ColumnDominance { removed: Vec<u32> },
    /// The row covering the most columns, added to the cover when nothing else applied.
    Greedy { selected: ImplicantId },
}

impl fmt::Display for ReductionStep {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Essential { selected } => {
                write!(f, "essential: select {}", selected.iter().join(", "))
            }
            Self::RowDominance { removed } => {
                write!(f, "row dominance: remove {}", removed.iter().join(", "))
            }
            Self::ColumnDominance { removed } => {
                write!(f, "column dominance: remove {}", removed.iter().join(", "))
            }
            Self::Greedy { selected } => write!(f, "greedy: select {}", selected),
        }
    }
}

/// The result of reducing a chart: the selected rows, and how they were arrived at.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoverSolution {
    cover: Vec<ImplicantId>,
    steps: Vec<ReductionStep>,
}

impl CoverSolution {
    /// The selected implicants, in the order they were selected.
    #[inline]
    pub fn cover(&self) -> &[ImplicantId] {
        &self.cover
    }

    #[inline]
    pub fn into_cover(self) -> Vec<ImplicantId> {
        self.cover
    }

    /// Every reduction, in the order it was applied.
    #[inline]
    pub fn steps(&self) -> &[ReductionStep] {
        &self.steps
    }

    /// Returns true if no heuristic choice was made: every selection was forced by an essential
    /// row once dominated rows and columns were removed.
    pub fn is_exact(&self) -> bool {
        !self
            .steps
            .iter()
            .any(|step| matches!(step, ReductionStep::Greedy { .. }))
    }

    /// Returns the columns covered by the selected rows of `chart`, which must be the chart this
    /// solution was computed from.
    pub fn covered_columns(&self, chart: &Chart) -> BTreeSet<u32> {
        self.cover
            .iter()
            .filter_map(|&id| chart.row(id))
            .flat_map(|row| row.columns().iter().copied())
            .collect()
    }

    fn apply(&mut self, step: ReductionStep) {
        debug!("{}", step);
        match &step {
            ReductionStep::Essential { selected } => self.cover.extend(selected),
            ReductionStep::Greedy { selected } => self.cover.push(*selected),
            ReductionStep::RowDominance { .. } | ReductionStep::ColumnDominance { .. } => {}
        }
        self.steps.push(step);
    }
}

impl Chart {
    /// Reduces the chart until every column is covered, and returns the rows selected on the
    /// way.
    ///
    /// Each iteration applies the first of these that makes progress, then starts over:
    ///
    /// 1. select essential rows (the only row left in some column);
    /// 2. delete dominated rows;
    /// 3. delete dominating columns;
    /// 4. select the row with the most columns.
    ///
    /// The last step is a heuristic, so on cyclic charts the cover may not be a minimum one.
    ///
    /// ```
    /// use qm_min::{chart::Chart, primes::PrimeImplicants, rounds::Rounds};
    ///
    /// let primes = PrimeImplicants::extract(&Rounds::merge(3, &[1, 3, 6]));
    /// let solution = Chart::build(&primes).solve();
    /// let cover: Vec<_> = solution.cover().iter().map(|id| id.to_string()).collect();
    /// assert_eq!(cover, ["P1", "P2"]);
    /// assert!(solution.is_exact());
    /// ```
    pub fn solve(self) -> CoverSolution {
        let mut chart = self;
        let mut solution = CoverSolution::default();

        loop {
            chart.check_consistency();
            if chart.is_empty() {
                return solution;
            }

            let step = chart.next_step();
            chart = match &step {
                ReductionStep::Essential { selected } => chart.select_rows(selected),
                ReductionStep::RowDominance { removed } => chart.remove_rows(removed),
                ReductionStep::ColumnDominance { removed } => {
                    chart.remove_columns(&removed.iter().copied().collect())
                }
                ReductionStep::Greedy { selected } => chart.select_rows(&[*selected]),
            };
            solution.apply(step);
        }
    }

    fn check_consistency(&self) {
        assert_eq!(
            self.rows().is_empty(),
            self.columns().is_empty(),
            "chart has {} row(s) but {} column(s): every remaining row must own an uncovered \
             column and every remaining column must have a row",
            self.rows().len(),
            self.columns().len(),
        );
    }

    fn next_step(&self) -> ReductionStep {
        let selected = self.essential_rows();
        if !selected.is_empty() {
            return ReductionStep::Essential { selected };
        }

        let removed = self.dominated_rows();
        if !removed.is_empty() {
            return ReductionStep::RowDominance { removed };
        }

        let removed = self.dominating_columns();
        if !removed.is_empty() {
            return ReductionStep::ColumnDominance { removed };
        }

        ReductionStep::Greedy {
            selected: self.widest_row(),
        }
    }

    /// Rows that are the only row in at least one column, in column order.
    fn essential_rows(&self) -> Vec<ImplicantId> {
        self.columns()
            .iter()
            .filter(|column| column.rows().len() == 1)
            .flat_map(|column| column.rows().iter().copied())
            .unique()
            .collect()
    }

    /// Rows whose columns are contained in another row's columns.
    ///
    /// Candidates are scanned from the last row down. A row that has already been marked
    /// dominated can't dominate anything, so of two identical rows only the later one goes.
    fn dominated_rows(&self) -> Vec<ImplicantId> {
        let rows = self.rows();
        let mut dominated = Vec::new();

        for (ix, candidate) in rows.iter().enumerate().rev() {
            let is_dominated = rows.iter().enumerate().any(|(other_ix, other)| {
                other_ix != ix
                    && !dominated.contains(&other.id())
                    && candidate.columns().is_subset(other.columns())
            });
            if is_dominated {
                dominated.push(candidate.id());
            }
        }

        dominated
    }

    /// Columns whose rows contain another column's rows.
    ///
    /// Covering the smaller column necessarily covers the larger one, so the larger one can go.
    /// A column already marked for removal doesn't mark others, so of two identical columns only
    /// the later one goes.
    fn dominating_columns(&self) -> Vec<u32> {
        let columns = self.columns();
        let mut dominating: Vec<u32> = Vec::new();

        for (ix, column) in columns.iter().enumerate() {
            if dominating.contains(&column.label()) {
                continue;
            }
            for (other_ix, other) in columns.iter().enumerate() {
                if other_ix != ix
                    && !dominating.contains(&other.label())
                    && column.rows().is_subset(other.rows())
                {
                    dominating.push(other.label());
                }
            }
        }

        dominating
    }

    /// The row with the most columns. Ties go to the earliest row.
    fn widest_row(&self) -> ImplicantId {
        self.rows()
            .iter()
            .min_by_key(|row| Reverse(row.columns().len()))
            .map(|row| row.id())
            .expect("chart with columns has at least one row")
    }
}
