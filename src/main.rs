//! # internstats command-line entry point
//!
//! ```bash
//! internstats summarize --file estagios.csv
//! internstats summarize --file estagios.csv --format json --output summary.json
//! internstats columns --file estagios.csv
//! internstats init-config
//! ```

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout)] // Allow println! in main binary

mod cli;

use anyhow::Result;
use clap::Parser as _;
use internstats::logging::{self, LogOptions};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    logging::init(&LogOptions {
        verbose: cli.verbose,
        log_file: !cli.no_log_file,
    })?;

    cli::run_command(cli.command)
}
