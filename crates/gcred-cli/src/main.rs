// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Result;
use gcred_cli::{Cli, Parser};
use gcred_logging::CliLogLevel;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Warnings by default so skipped environment values are visible on stderr
    cli.logging.clone().init("gcred", CliLogLevel::Warn)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    cli.run(&mut out)
}
