// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{details::FixtureDetails, value_generator::ValueGenerator};
use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::{
    eyre::{ensure, WrapErr},
    Result,
};
use log::{debug, info};
use once_cell::sync::Lazy;
use proptest::prelude::*;
use qm_min::{pattern::Pattern, problem::Problem};
use std::fs;

/// The fixture data directory, along with the fixtures defined in code.
#[derive(Clone, Debug)]
pub struct AllFixtures {
    dir: Utf8PathBuf,
}

static ALL_FIXTURES_STATIC: Lazy<AllFixtures> = Lazy::new(AllFixtures::init);

impl AllFixtures {
    pub const INPUTS_DIR: &'static str = "inputs";
    pub const OUTPUTS_DIR: &'static str = "outputs";

    pub fn get() -> &'static Self {
        &*ALL_FIXTURES_STATIC
    }

    /// Uses `dir` as the data directory, with inputs and outputs in subdirectories of it.
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn init() -> Self {
        let dir: Utf8PathBuf = env!("CARGO_MANIFEST_DIR").into();
        match dir.parent() {
            Some(parent) => Self::new(parent.join("data")),
            None => Self::new(dir.join("data")),
        }
    }

    #[inline]
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    pub fn inputs_dir(&self) -> Utf8PathBuf {
        self.dir.join(Self::INPUTS_DIR)
    }

    pub fn outputs_dir(&self) -> Utf8PathBuf {
        self.dir.join(Self::OUTPUTS_DIR)
    }

    /// Fixtures with hand-checked expected results.
    pub fn named() -> Vec<FixtureDetails> {
        let fixture = |name: &'static str,
                       variable_count: usize,
                       minterms: &[u32],
                       expected: Option<&[&str]>| {
            let problem = Problem::new(variable_count, minterms.iter().copied())
                .expect("named fixtures are valid problems");
            let details = FixtureDetails::new(name, problem);
            match expected {
                Some(expected) => details.with_expected(patterns(expected)),
                None => details,
            }
        };

        vec![
            fixture("constant-true", 2, &[0, 1, 2, 3], Some(&["--"][..])),
            fixture("single-minterm", 3, &[5], Some(&["101"][..])),
            fixture(
                "five-variables",
                5,
                &[
                    1, 3, 4, 5, 6, 9, 10, 11, 14, 15, 19, 20, 21, 23, 24, 26, 27, 28,
                ],
                None,
            ),
            fixture(
                "cyclic",
                3,
                &[0, 1, 2, 5, 6, 7],
                Some(&["00-", "-10", "1-1"][..]),
            ),
            fixture(
                "dominance",
                4,
                &[4, 8, 10, 11, 12, 15],
                Some(&["-100", "1-11", "10-0"][..]),
            ),
            fixture(
                "textbook",
                4,
                &[0, 1, 2, 5, 6, 7, 8, 9, 10, 14],
                Some(&["-00-", "--10", "01-1"][..]),
            ),
        ]
    }

    /// Writes `count` randomly generated problems with `variable_count` variables to the inputs
    /// directory. The same seed always produces the same problems.
    pub fn generate_inputs(
        &self,
        seed: &str,
        count: usize,
        variable_count: usize,
    ) -> Result<Vec<Utf8PathBuf>> {
        let inputs_dir = self.inputs_dir();
        fs::create_dir_all(&inputs_dir)
            .wrap_err_with(|| format!("failed to create {}", inputs_dir))?;

        let mut value_gen = ValueGenerator::from_seed(seed);
        let strategy = any_with::<Problem>(Some((variable_count, variable_count)));

        (0..count)
            .map(|ix| {
                let problem = value_gen.partial_clone().generate(strategy.clone());
                let details = FixtureDetails::new(format!("{}-{}", seed, ix), problem);
                let path = inputs_dir.join(format!("{}.txt", details.name()));
                fs::write(&path, details.input_contents())
                    .wrap_err_with(|| format!("failed to write {}", path))?;
                debug!("wrote {}", path);
                Ok(path)
            })
            .collect()
    }

    /// Minimizes every input and writes the results to the outputs directory, returning the
    /// number of outputs written.
    pub fn generate_outputs(&self) -> Result<usize> {
        let outputs_dir = self.outputs_dir();
        fs::create_dir_all(&outputs_dir)
            .wrap_err_with(|| format!("failed to create {}", outputs_dir))?;

        // Existing outputs are replaced, so they aren't read back.
        let inputs = self
            .input_paths()?
            .into_iter()
            .map(|path| read_details(&path))
            .collect::<Result<Vec<_>>>()?;
        for details in &inputs {
            let path = outputs_dir.join(format!("{}.txt", details.name()));
            fs::write(&path, details.output_contents())
                .wrap_err_with(|| format!("failed to write {}", path))?;
            debug!("wrote {}", path);
        }
        Ok(inputs.len())
    }

    /// Reads every input file, sorted by name.
    ///
    /// If an input has a matching output file, the patterns recorded there become its expected
    /// result.
    pub fn inputs(&self) -> Result<Vec<FixtureDetails>> {
        self.input_paths()?
            .into_iter()
            .map(|path| self.read_input(&path))
            .collect()
    }

    fn input_paths(&self) -> Result<Vec<Utf8PathBuf>> {
        let inputs_dir = self.inputs_dir();
        if !inputs_dir.exists() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in
            fs::read_dir(&inputs_dir).wrap_err_with(|| format!("failed to read {}", inputs_dir))?
        {
            let path = Utf8PathBuf::try_from(entry?.path())?;
            if path.extension() == Some("txt") {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    fn read_input(&self, path: &Utf8Path) -> Result<FixtureDetails> {
        let details = read_details(path)?;

        let output_path = self.outputs_dir().join(format!("{}.txt", details.name()));
        if !output_path.exists() {
            return Ok(details);
        }
        let output = read_details(&output_path)?;
        ensure!(
            output.problem() == details.problem(),
            "{} doesn't match the problem in {}",
            output_path,
            path
        );
        Ok(match output.expected() {
            Some(expected) => details.with_expected(expected.to_vec()),
            None => details,
        })
    }

    /// Checks the named fixtures and every input, returning the number checked.
    pub fn check_all(&self) -> Result<usize> {
        let fixtures: Vec<_> = Self::named().into_iter().chain(self.inputs()?).collect();
        for details in &fixtures {
            details.check()?;
            debug!("{}: ok", details.name());
        }
        info!("checked {} fixtures", fixtures.len());
        Ok(fixtures.len())
    }
}

/// Reads a fixture file, naming it after the file stem.
fn read_details(path: &Utf8Path) -> Result<FixtureDetails> {
    let name = path.file_stem().unwrap_or_default().to_owned();
    let contents = fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path))?;
    FixtureDetails::parse(name, &contents)
}

fn patterns(patterns: &[&str]) -> Vec<Pattern> {
    patterns
        .iter()
        .map(|pattern| {
            pattern
                .parse()
                .expect("named fixture patterns are well-formed")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named() {
        for details in AllFixtures::named() {
            if let Err(err) = details.check() {
                panic!("{:?}", err);
            }
        }
    }

    #[test]
    fn test_inputs() {
        // Whatever is checked in must stay consistent with its outputs.
        for details in AllFixtures::get().inputs().unwrap() {
            if let Err(err) = details.check() {
                panic!("{:?}", err);
            }
        }
    }

    fn temp_fixtures() -> (tempfile::TempDir, AllFixtures) {
        let temp = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::try_from(temp.path().to_path_buf()).unwrap();
        (temp, AllFixtures::new(dir))
    }

    fn problems(fixtures: &AllFixtures) -> Vec<Problem> {
        fixtures
            .inputs()
            .unwrap()
            .into_iter()
            .map(|details| details.problem().clone())
            .collect()
    }

    #[test]
    fn test_generate_round_trip() {
        let (_temp, fixtures) = temp_fixtures();
        assert!(fixtures.inputs().unwrap().is_empty());

        let paths = fixtures.generate_inputs("qm-min_test", 8, 4).unwrap();
        assert_eq!(paths.len(), 8);
        assert_eq!(paths[0].file_name(), Some("qm-min_test-0.txt"));

        // Inputs without outputs have nothing to compare against.
        let inputs = fixtures.inputs().unwrap();
        assert_eq!(inputs.len(), 8);
        assert!(inputs.iter().all(|details| details.expected().is_none()));
        assert!(inputs
            .iter()
            .all(|details| details.problem().variable_count() == 4));

        assert_eq!(fixtures.generate_outputs().unwrap(), 8);
        for details in fixtures.inputs().unwrap() {
            let expected = details.expected().expect("every input has an output now");
            assert_eq!(expected, details.problem().minimize().patterns());
        }
        assert_eq!(
            fixtures.check_all().unwrap(),
            AllFixtures::named().len() + 8
        );

        // The same seed produces the same problems.
        let (_other_temp, other) = temp_fixtures();
        other.generate_inputs("qm-min_test", 8, 4).unwrap();
        assert_eq!(problems(&fixtures), problems(&other));
    }

    #[test]
    fn test_mismatched_outputs() {
        let (_temp, fixtures) = temp_fixtures();
        fs::create_dir_all(fixtures.inputs_dir()).unwrap();
        fs::create_dir_all(fixtures.outputs_dir()).unwrap();
        let input = "variables: 3\nminterms: 0,1,2,5,6,7\n";
        fs::write(fixtures.inputs_dir().join("cyclic.txt"), input).unwrap();

        // The other minimal cover of this cyclic chart, which the solver doesn't pick.
        fs::write(
            fixtures.outputs_dir().join("cyclic.txt"),
            format!("{}patterns: 0-0,-01,11-\n", input),
        )
        .unwrap();
        let err = fixtures.check_all().unwrap_err();
        assert!(err.to_string().contains("expected patterns"), "{}", err);

        // An output recorded for a different problem.
        fs::write(
            fixtures.outputs_dir().join("cyclic.txt"),
            "variables: 3\nminterms: 0,1,2,3\npatterns: 0--\n",
        )
        .unwrap();
        let err = fixtures.inputs().unwrap_err();
        assert!(err.to_string().contains("doesn't match"), "{}", err);

        // Once regenerated, the output agrees again.
        assert_eq!(fixtures.generate_outputs().unwrap(), 1);
        assert_eq!(
            fixtures.check_all().unwrap(),
            AllFixtures::named().len() + 1
        );
    }
}
