// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{chart::Chart, primes::ImplicantId};
use std::fmt;

impl Chart {
    #[inline]
    pub fn table_display(&self) -> ChartTableDisplay<'_> {
        ChartTableDisplay::new(self)
    }
}

/// Displays a chart as a table with one line per row and one column per minterm, in ascending
/// minterm order.
///
/// ```text
///      0 1 3
/// * P1 X X
///   P2   X X
/// ```
#[derive(Clone, Debug)]
pub struct ChartTableDisplay<'a> {
    chart: &'a Chart,
    highlighted: &'a [ImplicantId],
    mark: char,
}

impl<'a> ChartTableDisplay<'a> {
    pub fn new(chart: &'a Chart) -> Self {
        Self {
            chart,
            highlighted: &[],
            mark: 'X',
        }
    }

    /// Flags these rows with a `*`, typically the selected cover.
    pub fn with_highlighted(mut self, highlighted: &'a [ImplicantId]) -> Self {
        self.highlighted = highlighted;
        self
    }

    pub fn with_mark(mut self, mark: char) -> Self {
        self.mark = mark;
        self
    }
}

impl<'a> fmt::Display for ChartTableDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let labels = self.chart.sorted_labels();
        let cell_width = labels
            .iter()
            .map(|label| label.to_string().len())
            .max()
            .unwrap_or(1);
        let id_width = self
            .chart
            .rows()
            .iter()
            .map(|row| row.id().to_string().len())
            .max()
            .unwrap_or(0);

        let mut line = format!("{:width$}", "", width = id_width + 2);
        for label in &labels {
            line.push_str(&format!(" {:>width$}", label, width = cell_width));
        }
        writeln!(f, "{}", line.trim_end())?;

        for row in self.chart.rows() {
            let flag = if self.highlighted.contains(&row.id()) {
                '*'
            } else {
                ' '
            };
            let mut line = format!("{} {:<width$}", flag, row.id().to_string(), width = id_width);
            for label in &labels {
                let cell = if row.columns().contains(label) {
                    self.mark.to_string()
                } else {
                    String::new()
                };
                line.push_str(&format!(" {:>width$}", cell, width = cell_width));
            }
            writeln!(f, "{}", line.trim_end())?;
        }

        Ok(())
    }
}
