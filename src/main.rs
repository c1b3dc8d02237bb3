//! Command-line entry point.
//!
//! ```bash
//! sheetload                                  # built-in file, sheet and table
//! sheetload -f tours.xlsx -s PLANNING -t dynamic_tours
//! DATABASE_URL=postgres://... sheetload --dry-run
//! ```
//!
//! Any fatal error is returned from `main`, which prints it and exits with a
//! non-zero status. Rows rejected by the database do not fail the run.

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stderr)] // Logging may not be up yet

mod cli;

use clap::Parser as _;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = sheetload::logging::init() {
        eprintln!("Logging unavailable: {e:#}");
    }

    let cli = cli::Cli::parse();

    tokio::runtime::Runtime::new()?.block_on(cli::run(cli))?;
    Ok(())
}
