//! rewire - Entry Point
//!
//! Operator tool for persisted dependency wiring. See [`rewire::cli`].

use clap::Parser;
use rewire::cli::{Cli, run};

fn main() -> anyhow::Result<()> {
    run(Cli::parse())
}
