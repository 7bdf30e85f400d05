//! `mascii`: inspect the records of Maya ASCII scene files.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
