// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{bits::to_binary, errors::InvalidPattern, term::Term, MAX_VARIABLES};
use arrayvec::ArrayVec;
use itertools::{Itertools, Position};
use std::{borrow::Cow, fmt, str::FromStr};

/// A product term over a fixed number of variables, most significant variable first.
///
/// `Some(true)` is a positive literal, `Some(false)` a complemented literal, and `None` a
/// don't-care position.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pattern {
    literals: ArrayVec<Option<bool>, MAX_VARIABLES>,
}

impl Pattern {
    /// Encodes a term: its smallest minterm in binary, with every don't-care bit overwritten.
    ///
    /// Bit position `p` is counted from the least significant end, so it lands on character
    /// `variable_count - 1 - p`.
    pub fn from_term(term: &Term, variable_count: usize) -> Self {
        assert!(
            variable_count <= MAX_VARIABLES,
            "variable count {} must be at most {}",
            variable_count,
            MAX_VARIABLES
        );
        let mut literals: ArrayVec<Option<bool>, MAX_VARIABLES> = to_binary(
            term.min_index(),
            variable_count,
        )
        .bytes()
        .map(|bit| Some(bit == b'1'))
        .collect();

        for &position in term.free_bits() {
            let position = position as usize;
            assert!(
                position < variable_count,
                "don't-care bit {} is out of range for {} variable(s)",
                position,
                variable_count
            );
            literals[variable_count - 1 - position] = None;
        }

        Self { literals }
    }

    /// The number of variables this pattern ranges over.
    #[inline]
    pub fn variable_count(&self) -> usize {
        self.literals.len()
    }

    #[inline]
    pub fn literals(&self) -> &[Option<bool>] {
        &self.literals
    }

    /// The number of positions that aren't don't-cares.
    pub fn literal_count(&self) -> usize {
        self.literals.iter().filter(|literal| literal.is_some()).count()
    }

    /// Returns true if the minterm `index` is consistent with this pattern.
    pub fn covers(&self, index: u32) -> bool {
        let width = self.variable_count();
        if width < 32 && index >> width != 0 {
            return false;
        }
        self.literals
            .iter()
            .enumerate()
            .all(|(ix, literal)| match literal {
                Some(value) => ((index >> (width - 1 - ix)) & 1 == 1) == *value,
                None => true,
            })
    }

    /// Returns every minterm consistent with this pattern, in ascending order.
    pub fn minterms(&self) -> Vec<u32> {
        let width = self.variable_count();
        let mut base = 0_u32;
        // Positions counted from the least significant bit, ascending.
        let mut free_positions = Vec::new();
        for (ix, literal) in self.literals.iter().enumerate() {
            let position = width - 1 - ix;
            match literal {
                Some(true) => base |= 1 << position,
                Some(false) => {}
                None => free_positions.push(position),
            }
        }
        free_positions.reverse();

        (0_u32..1 << free_positions.len())
            .map(|selector| {
                free_positions
                    .iter()
                    .enumerate()
                    .filter(|(bit, _)| (selector >> bit) & 1 == 1)
                    .fold(base, |acc, (_, &position)| acc | 1 << position)
            })
            .collect()
    }

    #[inline]
    pub fn matrix_display(&self) -> PatternMatrixDisplay<'_> {
        PatternMatrixDisplay::new(self)
    }

    #[inline]
    pub fn algebraic_display(&self) -> PatternAlgebraicDisplay<'_> {
        PatternAlgebraicDisplay::new(self)
    }
}

impl FromStr for Pattern {
    type Err = InvalidPattern;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len == 0 {
            return Err(InvalidPattern::Empty);
        }
        if len > MAX_VARIABLES {
            return Err(InvalidPattern::TooLong {
                len,
                max: MAX_VARIABLES,
            });
        }

        let literals = s
            .chars()
            .enumerate()
            .map(|(position, ch)| match ch {
                '0' => Ok(Some(false)),
                '1' => Ok(Some(true)),
                '-' => Ok(None),
                _ => Err(InvalidPattern::InvalidChar { ch, position }),
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { literals })
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.matrix_display())
    }
}

/// The name of variable `ix`, where variable 0 is the most significant bit.
pub(crate) fn variable_name(ix: usize) -> char {
    debug_assert!(ix < MAX_VARIABLES);
    (b'A' + ix as u8) as char
}

/// Displays a pattern as a string over `0`, `1` and a don't-care character (`-` by default).
#[derive(Clone, Debug)]
pub struct PatternMatrixDisplay<'a> {
    pattern: &'a Pattern,
    dont_care: char,
}

impl<'a> PatternMatrixDisplay<'a> {
    pub fn new(pattern: &'a Pattern) -> Self {
        Self {
            pattern,
            dont_care: '-',
        }
    }

    pub fn with_dont_care(mut self, dont_care: char) -> Self {
        self.dont_care = dont_care;
        self
    }
}

impl<'a> fmt::Display for PatternMatrixDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for literal in self.pattern.literals() {
            let ch = match literal {
                Some(true) => '1',
                Some(false) => '0',
                None => self.dont_care,
            };
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

/// Displays a pattern as a product of literals, like `AB'D`.
///
/// A pattern without literals is the constant `1`.
pub struct PatternAlgebraicDisplay<'a> {
    pattern: &'a Pattern,
}

impl<'a> PatternAlgebraicDisplay<'a> {
    pub fn new(pattern: &'a Pattern) -> Self {
        Self { pattern }
    }
}

impl<'a> fmt::Display for PatternAlgebraicDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.pattern.literal_count() == 0 {
            return write!(f, "1");
        }
        for (ix, literal) in self.pattern.literals().iter().enumerate() {
            match literal {
                Some(true) => write!(f, "{}", variable_name(ix))?,
                Some(false) => write!(f, "{}'", variable_name(ix))?,
                None => {}
            }
        }
        Ok(())
    }
}

/// Displays a sum of products, like `AB' + C`.
pub struct ExpressionDisplay<'a> {
    patterns: &'a [Pattern],
    separator: Cow<'a, str>,
}

impl<'a> ExpressionDisplay<'a> {
    pub fn new(patterns: &'a [Pattern]) -> Self {
        Self {
            patterns,
            separator: Cow::Borrowed(" + "),
        }
    }

    pub fn with_separator(mut self, separator: impl Into<Cow<'a, str>>) -> Self {
        self.separator = separator.into();
        self
    }
}

impl<'a> fmt::Display for ExpressionDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.patterns.is_empty() {
            return write!(f, "0");
        }
        for pattern in self.patterns.iter().with_position() {
            match pattern {
                Position::First(pattern) | Position::Middle(pattern) => {
                    write!(f, "{}{}", pattern.algebraic_display(), self.separator)?;
                }
                Position::Last(pattern) | Position::Only(pattern) => {
                    write!(f, "{}", pattern.algebraic_display())?;
                }
            }
        }
        Ok(())
    }
}
