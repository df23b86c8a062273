//! DataCollab command-line entry point.
//!
//! ```text
//! datacollab analyze data.csv
//! datacollab aggregate data.csv --group-by month --column sales --function sum
//! datacollab demo
//! ```

#![warn(clippy::all, rust_2018_idioms)]

mod cli;

use clap::Parser as _;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // File logging is best-effort: an unwritable data dir should not keep the
    // CLI from running.
    if let Err(e) = datacollab::logging::init() {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    let cli = cli::Cli::parse();
    cli::run_command(cli.command)?;
    Ok(())
}
