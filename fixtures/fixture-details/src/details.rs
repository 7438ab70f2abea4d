// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use color_eyre::{
    eyre::{bail, ensure, eyre, WrapErr},
    Result,
};
use itertools::Itertools;
use qm_min::{chart::Chart, minimizer::Minimizer, pattern::Pattern, problem::Problem};
use std::{borrow::Cow, collections::BTreeSet};

/// A minimization problem along with, optionally, the patterns it is expected to minimize to.
#[derive(Clone, Debug)]
pub struct FixtureDetails {
    name: Cow<'static, str>,
    problem: Problem,
    expected: Option<Vec<Pattern>>,
}

impl FixtureDetails {
    pub fn new(name: impl Into<Cow<'static, str>>, problem: Problem) -> Self {
        Self {
            name: name.into(),
            problem,
            expected: None,
        }
    }

    /// Sets the patterns the minimizer must produce, in cover order.
    pub fn with_expected(mut self, expected: Vec<Pattern>) -> Self {
        self.expected = Some(expected);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    #[inline]
    pub fn expected(&self) -> Option<&[Pattern]> {
        self.expected.as_deref()
    }

    /// Minimizes the problem and verifies the result.
    ///
    /// The cover must contain every essential prime implicant, and its patterns must cover
    /// exactly the problem's minterms and survive a round trip through their text form. If
    /// expected patterns are set, the cover must match them too.
    pub fn check(&self) -> Result<()> {
        let minimizer = self.problem.minimize();
        self.check_coverage(&minimizer)?;
        self.check_essentials(&minimizer)?;

        for pattern in minimizer.patterns() {
            let text = pattern.to_string();
            let parsed: Pattern = text
                .parse()
                .wrap_err_with(|| format!("{}: pattern {} failed to parse", self.name, text))?;
            ensure!(
                &parsed == pattern,
                "{}: pattern {} parsed as {}",
                self.name,
                text,
                parsed
            );
        }

        if let Some(expected) = &self.expected {
            ensure!(
                minimizer.patterns() == expected.as_slice(),
                "{}: expected patterns {}, got {}",
                self.name,
                expected.iter().join(","),
                minimizer.patterns().iter().join(","),
            );
        }
        Ok(())
    }

    fn check_coverage(&self, minimizer: &Minimizer) -> Result<()> {
        let mut covered = BTreeSet::new();
        for pattern in minimizer.patterns() {
            for index in pattern.minterms() {
                if !self.problem.contains(index) {
                    bail!(
                        "{}: pattern {} covers {}, which isn't a minterm",
                        self.name,
                        pattern,
                        index
                    );
                }
                covered.insert(index);
            }
        }

        let missing = self
            .problem
            .minterms()
            .iter()
            .filter(|index| !covered.contains(*index))
            .join(",");
        ensure!(
            missing.is_empty(),
            "{}: minterms {} not covered",
            self.name,
            missing
        );
        Ok(())
    }

    fn check_essentials(&self, minimizer: &Minimizer) -> Result<()> {
        let chart = Chart::build(minimizer.prime_implicants());
        let cover = minimizer.cover();
        for column in chart.columns() {
            if let Ok(only) = column.rows().iter().exactly_one() {
                ensure!(
                    cover.contains(only),
                    "{}: {} is the only implicant covering {} but wasn't selected",
                    self.name,
                    only,
                    column.label()
                );
            }
        }
        Ok(())
    }

    /// Renders the problem in input file form.
    pub fn input_contents(&self) -> String {
        format!(
            "variables: {}\nminterms: {}\n",
            self.problem.variable_count(),
            self.problem.minterms().iter().join(","),
        )
    }

    /// Renders the problem and its minimization in output file form.
    pub fn output_contents(&self) -> String {
        let minimizer = self.problem.minimize();
        format!(
            "{}primes: {}\npatterns: {}\n",
            self.input_contents(),
            minimizer.prime_implicants().iter().join("; "),
            minimizer.patterns().iter().join(","),
        )
    }

    /// Parses the contents of an input or output file.
    ///
    /// Output files carry a `patterns` line, which becomes the expected result. Other keys are
    /// ignored.
    pub fn parse(name: impl Into<Cow<'static, str>>, contents: &str) -> Result<Self> {
        let name = name.into();
        let mut variable_count = None;
        let mut minterms = None;
        let mut expected = None;

        for (line_no, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (key, value) = line
                .split_once(':')
                .ok_or_else(|| eyre!("{}:{}: expected `key: value`", name, line_no + 1))?;
            let value = value.trim();
            match key.trim() {
                "variables" => {
                    let count: usize = value.parse().wrap_err_with(|| {
                        format!("{}:{}: invalid variable count", name, line_no + 1)
                    })?;
                    variable_count = Some(count);
                }
                "minterms" => {
                    let parsed = parse_list(value, |item| item.parse::<u32>().map_err(Into::into))
                        .wrap_err_with(|| format!("{}:{}: invalid minterms", name, line_no + 1))?;
                    minterms = Some(parsed);
                }
                "patterns" => {
                    let parsed = parse_list(value, |item| item.parse::<Pattern>().map_err(Into::into))
                        .wrap_err_with(|| format!("{}:{}: invalid patterns", name, line_no + 1))?;
                    expected = Some(parsed);
                }
                _ => {}
            }
        }

        let variable_count =
            variable_count.ok_or_else(|| eyre!("{}: missing `variables` line", name))?;
        let minterms = minterms.ok_or_else(|| eyre!("{}: missing `minterms` line", name))?;
        let problem = Problem::new(variable_count, minterms)
            .wrap_err_with(|| format!("{}: invalid problem", name))?;

        Ok(Self {
            name,
            problem,
            expected,
        })
    }
}

/// Parses a comma-separated list. An empty string is an empty list, but an empty item inside a
/// non-empty list is an error.
pub fn parse_list<T>(
    list: &str,
    mut parse_item: impl FnMut(&str) -> Result<T>,
) -> Result<Vec<T>> {
    if list.trim().is_empty() {
        return Ok(Vec::new());
    }
    list.split(',')
        .map(str::trim)
        .enumerate()
        .map(|(position, item)| {
            if item.is_empty() {
                bail!("empty item at position {} in `{}`", position, list);
            }
            parse_item(item).wrap_err_with(|| format!("invalid item `{}`", item))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(variable_count: usize, minterms: &[u32]) -> FixtureDetails {
        FixtureDetails::new(
            "test",
            Problem::new(variable_count, minterms.iter().copied()).unwrap(),
        )
    }

    fn patterns(patterns: &[&str]) -> Vec<Pattern> {
        patterns.iter().map(|p| p.parse().unwrap()).collect()
    }

    #[test]
    fn test_check_expected() {
        let fixture = details(3, &[0, 1, 2, 5, 6, 7]).with_expected(patterns(&["00-", "-10", "1-1"]));
        fixture.check().unwrap();

        let fixture = details(3, &[0, 1, 2, 5, 6, 7]).with_expected(patterns(&["0-0", "-01", "11-"]));
        let err = fixture.check().unwrap_err();
        assert!(err.to_string().contains("expected patterns"), "{}", err);
    }

    #[test]
    fn test_output_contents() {
        let fixture = details(3, &[1, 3, 6]);
        assert_eq!(
            fixture.output_contents(),
            "variables: 3\nminterms: 1,3,6\nprimes: P1: 6; P2: 1,3 (2)\npatterns: 110,0-1\n"
        );
    }

    #[test]
    fn test_parse() {
        let parsed = FixtureDetails::parse(
            "parsed",
            "variables: 3\nminterms: 6, 1,3\n\nprimes: P1: 6; P2: 1,3 (2)\npatterns: 110,0-1\n",
        )
        .unwrap();
        assert_eq!(parsed.name(), "parsed");
        assert_eq!(parsed.problem(), details(3, &[1, 3, 6]).problem());
        assert_eq!(parsed.expected(), Some(patterns(&["110", "0-1"]).as_slice()));
        parsed.check().unwrap();

        let input = FixtureDetails::parse("input", "variables: 3\nminterms: 1,3,6\n").unwrap();
        assert_eq!(input.expected(), None);
    }

    #[test]
    fn test_parse_list() {
        let parse = |list| parse_list(list, |item| Ok(item.parse::<u32>()?));
        assert_eq!(parse("").unwrap(), Vec::<u32>::new());
        assert_eq!(parse("  ").unwrap(), Vec::<u32>::new());
        assert_eq!(parse("1, 3 ,6").unwrap(), [1, 3, 6]);

        let err = parse("1,,3").unwrap_err();
        assert!(err.to_string().contains("empty item"), "{}", err);
        assert!(parse(",1").is_err());
        assert!(parse("1,x").is_err());
    }

    #[test]
    fn test_parse_errors() {
        for contents in [
            "minterms: 1,3",
            "variables: 3",
            "variables: three\nminterms: 1",
            "variables: 3\nminterms: 1,x",
            "variables: 3\nminterms: 1,,3",
            "variables: 3\nminterms: 1,3,",
            "variables: 3\nminterms: 9",
            "variables: 3\nminterms: 1\npatterns: 0-2",
            "variables 3",
        ] {
            assert!(
                FixtureDetails::parse("bad", contents).is_err(),
                "{:?} should fail to parse",
                contents
            );
        }
    }
}
