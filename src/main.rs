use anyhow::Result;
use clap::Parser;
use gitpulse::cli::Cli;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    cli.execute()
}
