// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::primes::{ImplicantId, PrimeImplicants};
use std::collections::{hash_map::Entry, BTreeSet, HashMap};

/// One prime implicant in the chart, with the minterms it still has to cover.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    id: ImplicantId,
    columns: BTreeSet<u32>,
}

impl Row {
    pub fn new(id: ImplicantId, columns: impl IntoIterator<Item = u32>) -> Self {
        Self {
            id,
            columns: columns.into_iter().collect(),
        }
    }

    #[inline]
    pub fn id(&self) -> ImplicantId {
        self.id
    }

    #[inline]
    pub fn columns(&self) -> &BTreeSet<u32> {
        &self.columns
    }
}

/// One minterm in the chart, with the prime implicants that still cover it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    label: u32,
    rows: BTreeSet<ImplicantId>,
}

impl Column {
    pub fn new(label: u32, rows: impl IntoIterator<Item = ImplicantId>) -> Self {
        Self {
            label,
            rows: rows.into_iter().collect(),
        }
    }

    #[inline]
    pub fn label(&self) -> u32 {
        self.label
    }

    #[inline]
    pub fn rows(&self) -> &BTreeSet<ImplicantId> {
        &self.rows
    }
}

/// The prime implicant chart: rows are implicants, columns are minterms.
///
/// Every reduction consumes the chart and rebuilds it, rather than editing rows and columns in
/// place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Chart {
    rows: Vec<Row>,
    columns: Vec<Column>,
}

impl Chart {
    /// Creates a chart out of rows and columns that describe the same coverage relation.
    pub fn new(rows: Vec<Row>, columns: Vec<Column>) -> Self {
        debug_assert!(
            rows.iter().all(|row| row.columns.iter().all(|label| {
                columns
                    .iter()
                    .any(|column| column.label == *label && column.rows.contains(&row.id))
            })),
            "rows and columns must agree"
        );
        Self { rows, columns }
    }

    /// Builds the chart for a set of prime implicants.
    ///
    /// Columns appear in the order their minterms are first seen while walking the implicants.
    pub fn build(primes: &PrimeImplicants) -> Self {
        let rows = primes
            .iter()
            .map(|prime| Row::new(prime.id(), prime.indexes().iter().copied()))
            .collect();

        let mut columns: Vec<Column> = Vec::new();
        let mut positions: HashMap<u32, usize> = HashMap::new();
        for prime in primes {
            for &index in prime.indexes() {
                match positions.entry(index) {
                    Entry::Occupied(entry) => {
                        columns[*entry.get()].rows.insert(prime.id());
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(columns.len());
                        columns.push(Column::new(index, [prime.id()]));
                    }
                }
            }
        }

        Self { rows, columns }
    }

    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns true once every column has been covered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn row(&self, id: ImplicantId) -> Option<&Row> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn column(&self, label: u32) -> Option<&Column> {
        self.columns.iter().find(|column| column.label == label)
    }

    /// Column labels in ascending order.
    pub fn sorted_labels(&self) -> Vec<u32> {
        let mut labels: Vec<_> = self.columns.iter().map(|column| column.label).collect();
        labels.sort_unstable();
        labels
    }

    // ---
    // Reductions
    // ---

    /// Commits to the given rows: every column they cover is deleted, along with the rows
    /// themselves and any other row left without columns.
    pub(super) fn select_rows(self, ids: &[ImplicantId]) -> Self {
        let covered: BTreeSet<u32> = self
            .rows
            .iter()
            .filter(|row| ids.contains(&row.id))
            .flat_map(|row| row.columns.iter().copied())
            .collect();
        self.remove_columns(&covered)
    }

    /// Deletes the given rows, and strips them from every column. Columns left without rows
    /// are dropped.
    pub(super) fn remove_rows(self, ids: &[ImplicantId]) -> Self {
        let rows = self
            .rows
            .into_iter()
            .filter(|row| !ids.contains(&row.id))
            .collect();
        let columns = self
            .columns
            .into_iter()
            .filter_map(|column| {
                let rows: BTreeSet<_> = column
                    .rows
                    .into_iter()
                    .filter(|id| !ids.contains(id))
                    .collect();
                (!rows.is_empty()).then(|| Column {
                    label: column.label,
                    rows,
                })
            })
            .collect();
        Self { rows, columns }
    }

    /// Deletes the given columns, and strips them from every row. Rows left without columns
    /// are dropped.
    pub(super) fn remove_columns(self, labels: &BTreeSet<u32>) -> Self {
        let columns = self
            .columns
            .into_iter()
            .filter(|column| !labels.contains(&column.label))
            .collect();
        let rows = self
            .rows
            .into_iter()
            .filter_map(|row| {
                let columns: BTreeSet<_> = row.columns.difference(labels).copied().collect();
                (!columns.is_empty()).then(|| Row {
                    id: row.id,
                    columns,
                })
            })
            .collect();
        Self { rows, columns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rounds::Rounds;

    fn ids(ids: &[u32]) -> Vec<ImplicantId> {
        ids.iter().map(|&id| ImplicantId::new(id)).collect()
    }

    fn chart_for(variable_count: usize, minterms: &[u32]) -> Chart {
        Chart::build(&PrimeImplicants::extract(&Rounds::merge(
            variable_count,
            minterms,
        )))
    }

    #[test]
    fn test_build() {
        // P1 = 6, P2 = 1,3
        let chart = chart_for(3, &[1, 3, 6]);
        assert_eq!(
            chart.rows(),
            [Row::new(ImplicantId::new(1), [6]), Row::new(ImplicantId::new(2), [1, 3])]
        );
        // First-seen order, not ascending.
        let labels: Vec<_> = chart.columns().iter().map(Column::label).collect();
        assert_eq!(labels, [6, 1, 3]);
        assert_eq!(chart.sorted_labels(), [1, 3, 6]);
        let expected_rows: BTreeSet<_> = ids(&[2]).into_iter().collect();
        assert_eq!(chart.column(3).unwrap().rows(), &expected_rows);
    }

    #[test]
    fn test_every_minterm_is_a_column() {
        let minterms = [0, 1, 2, 5, 6, 7, 8, 9, 10, 14];
        let chart = chart_for(4, &minterms);
        assert_eq!(chart.sorted_labels(), minterms);
        for column in chart.columns() {
            for id in column.rows() {
                assert!(chart.row(*id).unwrap().columns().contains(&column.label()));
            }
        }
    }

    #[test]
    fn test_select_rows() {
        // P1 = 1,5  P2 = 5,7  P3 = 6,7 ...
        let chart = chart_for(4, &[0, 1, 2, 5, 6, 7, 8, 9, 10, 14]);
        let chart = chart.select_rows(&ids(&[2]));
        assert!(chart.row(ImplicantId::new(2)).is_none());
        assert!(chart.column(5).is_none());
        assert!(chart.column(7).is_none());
        assert_eq!(chart.row(ImplicantId::new(1)).unwrap().columns(), &BTreeSet::from([1]));
        assert_eq!(chart.row(ImplicantId::new(3)).unwrap().columns(), &BTreeSet::from([6]));
    }

    #[test]
    fn test_remove_rows_drops_empty_columns() {
        let rows = vec![
            Row::new(ImplicantId::new(1), [0, 1]),
            Row::new(ImplicantId::new(2), [1, 2]),
        ];
        let columns = vec![
            Column::new(0, ids(&[1])),
            Column::new(1, ids(&[1, 2])),
            Column::new(2, ids(&[2])),
        ];
        let chart = Chart::new(rows, columns).remove_rows(&ids(&[1]));
        assert_eq!(chart.rows(), [Row::new(ImplicantId::new(2), [1, 2])]);
        assert_eq!(
            chart.columns(),
            [Column::new(1, ids(&[2])), Column::new(2, ids(&[2]))]
        );
    }

    #[test]
    fn test_remove_columns_drops_empty_rows() {
        let rows = vec![
            Row::new(ImplicantId::new(1), [0]),
            Row::new(ImplicantId::new(2), [0, 1]),
        ];
        let columns = vec![Column::new(0, ids(&[1, 2])), Column::new(1, ids(&[2]))];
        let chart = Chart::new(rows, columns).remove_columns(&BTreeSet::from([0]));
        assert_eq!(chart.rows(), [Row::new(ImplicantId::new(2), [1])]);
        assert_eq!(chart.columns(), [Column::new(1, ids(&[2]))]);
    }
}
