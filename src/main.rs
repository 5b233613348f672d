//! # Cartridge Loading Calculator
//!
//! Charts the frequency response of a phono cartridge (series L + R) loaded by
//! a preamp input (parallel R + C) and prints a short diagnostic report.
//!
//! ## Usage
//!
//! ```bash
//! # 500 mH / 600 Ω cartridge into 47 kΩ and 200 pF, log axis, phase shown
//! cartridge-loading 500 600 47 200 log yes
//!
//! # No arguments: prompt for each value
//! cartridge-loading
//! ```

mod cli;

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(&cli)
}
