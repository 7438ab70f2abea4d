// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod command;

use clap::Parser;
use color_eyre::Result;
use command::FixtureManagerApp;

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let app = FixtureManagerApp::parse();
    app.exec()
}
