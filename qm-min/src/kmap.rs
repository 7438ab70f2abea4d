// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Karnaugh map rendering of a minimized function.

use crate::{errors::KarnaughUnsupported, minimizer::Minimizer};
use itertools::Itertools;
use std::fmt;

// Gray-coded cell layouts. Five variables use the four-variable layout twice, once with the most
// significant variable clear and once with it set.
const LAYOUT_2: &[&[u32]] = &[&[0, 1], &[2, 3]];
const LAYOUT_3: &[&[u32]] = &[&[0, 1, 3, 2], &[4, 5, 7, 6]];
const LAYOUT_4: &[&[u32]] = &[
    &[0, 1, 3, 2],
    &[4, 5, 7, 6],
    &[12, 13, 15, 14],
    &[8, 9, 11, 10],
];

/// Displays a minimized function as a Karnaugh map.
///
/// Each cell shows its minterm index, the function value, and the selected implicants that cover
/// it, like `5:1 P1,P3`.
pub struct KarnaughDisplay<'a> {
    minimizer: &'a Minimizer,
}

impl<'a> KarnaughDisplay<'a> {
    /// Returns an error unless the problem has 2 to 5 variables.
    pub fn new(minimizer: &'a Minimizer) -> Result<Self, KarnaughUnsupported> {
        let variable_count = minimizer.problem().variable_count();
        if !(2..=5).contains(&variable_count) {
            return Err(KarnaughUnsupported { variable_count });
        }
        Ok(Self { minimizer })
    }

    /// The maps to draw, as `(heading, offset, layout)`.
    fn maps(&self) -> Vec<(Option<&'static str>, u32, &'static [&'static [u32]])> {
        match self.minimizer.problem().variable_count() {
            2 => vec![(None, 0, LAYOUT_2)],
            3 => vec![(None, 0, LAYOUT_3)],
            4 => vec![(None, 0, LAYOUT_4)],
            5 => vec![(Some("A=0"), 0, LAYOUT_4), (Some("A=1"), 16, LAYOUT_4)],
            other => unreachable!("variable count {} was checked in the constructor", other),
        }
    }

    fn cell(&self, index: u32) -> String {
        let value = u8::from(self.minimizer.problem().contains(index));
        let covering = self
            .minimizer
            .selected_implicants()
            .filter(|prime| prime.term().covers(index))
            .map(|prime| prime.id())
            .join(",");
        if covering.is_empty() {
            format!("{}:{}", index, value)
        } else {
            format!("{}:{} {}", index, value, covering)
        }
    }
}

impl<'a> fmt::Display for KarnaughDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let maps: Vec<_> = self
            .maps()
            .into_iter()
            .map(|(heading, offset, layout)| {
                let cells: Vec<Vec<String>> = layout
                    .iter()
                    .map(|row| row.iter().map(|&ix| self.cell(offset + ix)).collect())
                    .collect();
                (heading, cells)
            })
            .collect();

        let width = maps
            .iter()
            .flat_map(|(_, cells)| cells.iter().flatten())
            .map(|cell| cell.chars().count())
            .max()
            .unwrap_or(0);

        for (map_ix, (heading, cells)) in maps.iter().enumerate() {
            if map_ix > 0 {
                writeln!(f)?;
            }
            if let Some(heading) = heading {
                writeln!(f, "{}", heading)?;
            }
            for row in cells {
                let line = row
                    .iter()
                    .map(|cell| format!("{:<width$}", cell, width = width))
                    .join(" | ");
                writeln!(f, "{}", line.trim_end())?;
            }
        }

        Ok(())
    }
}
