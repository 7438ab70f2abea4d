// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use color_eyre::{eyre::WrapErr, Result};
use fixture_details::{parse_list, AllFixtures};
use log::info;
use qm_min::problem::Problem;

#[derive(Debug, Parser)]
#[clap(about = "Minimize Boolean functions and manage test fixtures")]
pub struct FixtureManagerApp {
    #[clap(subcommand)]
    command: FixtureManagerCommand,
}

#[derive(Debug, Parser)]
pub enum FixtureManagerCommand {
    /// Minimize a function given as a list of minterms.
    Solve {
        /// Number of input variables.
        #[clap(long, short)]
        variables: usize,

        /// Comma-separated minterm indexes, e.g. `1,3,6`.
        #[clap(long, short)]
        minterms: String,

        /// Print every merge round.
        #[clap(long)]
        rounds: bool,

        /// Print the prime implicant chart.
        #[clap(long)]
        chart: bool,

        /// Print a Karnaugh map (2 to 5 variables only).
        #[clap(long)]
        kmap: bool,

        /// Print the chart reduction steps.
        #[clap(long)]
        trace: bool,
    },

    /// Generate random problems into the fixture inputs directory.
    GenerateInputs {
        #[clap(long, short, default_value_t = 64)]
        count: usize,

        #[clap(long, short, default_value_t = 4)]
        variables: usize,

        #[clap(long, short, default_value = "qm-min_4")]
        seed: String,
    },

    /// Minimize every fixture input and record the results as outputs.
    GenerateOutputs,

    /// Check named fixtures and every input against its recorded output.
    Check,
}

impl FixtureManagerApp {
    pub fn exec(self) -> Result<()> {
        self.command.exec()
    }
}

impl FixtureManagerCommand {
    pub fn exec(self) -> Result<()> {
        match self {
            Self::Solve {
                variables,
                minterms,
                rounds,
                chart,
                kmap,
                trace,
            } => {
                let minterms = parse_list(&minterms, |item| Ok(item.parse::<u32>()?))
                    .wrap_err("invalid minterm list")?;
                let problem = Problem::new(variables, minterms)?;
                let minimizer = problem.minimize();

                println!("{}", problem);
                if rounds {
                    println!("\n{}", minimizer.rounds());
                }
                if chart {
                    println!(
                        "\n{}",
                        minimizer
                            .chart()
                            .table_display()
                            .with_highlighted(minimizer.cover())
                    );
                }
                if trace {
                    println!();
                    for step in minimizer.solution().steps() {
                        println!("{}", step);
                    }
                }
                if kmap {
                    println!("\n{}", minimizer.karnaugh_display()?);
                }

                println!();
                for pattern in minimizer.patterns() {
                    println!("{}  {}", pattern, pattern.algebraic_display());
                }
                println!("\n= {}", minimizer.expression_display());
                Ok(())
            }
            Self::GenerateInputs {
                count,
                variables,
                seed,
            } => {
                let paths = AllFixtures::get().generate_inputs(&seed, count, variables)?;
                info!("generated {} inputs", paths.len());
                println!(
                    "wrote {} inputs to {}",
                    paths.len(),
                    AllFixtures::get().inputs_dir()
                );
                Ok(())
            }
            Self::GenerateOutputs => {
                let count = AllFixtures::get().generate_outputs()?;
                println!(
                    "wrote {} outputs to {}",
                    count,
                    AllFixtures::get().outputs_dir()
                );
                Ok(())
            }
            Self::Check => {
                let count = AllFixtures::get().check_all()?;
                println!("{} fixtures ok", count);
                Ok(())
            }
        }
    }
}
