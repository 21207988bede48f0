// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Folio — page sequencing and photometric correction for scanned pages.
//
// Entry point. Initialises logging, loads the saved configuration and runs
// the requested subcommand.

mod cli;
mod commands;
mod settings;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let data_dir = settings::data_dir();
    let config = settings::load_config(&data_dir);

    match commands::run(cli, config, &data_dir) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            commands::report_error(&err);
            ExitCode::FAILURE
        }
    }
}
