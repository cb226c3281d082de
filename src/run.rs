use crate::cli::{CommonArgs, RunArgs};
use crate::config::RunConfig;
use crate::driver::{Driver, SystemClock};
use crate::git::GitCli;
use crate::model::{Outcome, RunReport};
use anyhow::Context;
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::process::ExitCode;

pub fn exec(common: &CommonArgs, args: RunArgs) -> anyhow::Result<ExitCode> {
    let workdir = match &common.repo {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };

    let config = RunConfig {
        count: args.count,
        branch: args.branch,
        remote: args.remote,
        status_file: args.file,
        workdir,
    };
    config.validate().context("Invalid run configuration")?;

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let progress = if args.no_progress || !Term::stderr().is_term() {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(u64::from(config.count));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} commits")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    };

    let mut driver = Driver::new(GitCli::new(&config.workdir), SystemClock, rng, config.clone())
        .with_progress(progress);
    let report = driver
        .run()
        .context("Commit generation aborted: staging or committing failed")?;

    print_summary(&report, &config);

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_summary(report: &RunReport, config: &RunConfig) {
    let target = format!("{}/{}", config.remote, config.branch);

    match report.outcome {
        Outcome::Completed => println!(
            "{} {} of {} commits to {}",
            style("Pushed").green().bold(),
            report.pushed,
            report.requested,
            style(&target).cyan()
        ),
        Outcome::Halted { remaining } => println!(
            "{} after {} of {} commits, {} dropped ({})",
            style("Halted").red().bold(),
            report.pushed,
            report.requested,
            remaining,
            style(&target).cyan()
        ),
    }

    if report.write_failures > 0 {
        println!(
            "{} status file could not be written {} time(s)",
            style("Warning:").yellow(),
            report.write_failures
        );
    }
    if !report.final_push_ok {
        println!("{} final push failed", style("Warning:").yellow());
    }
}
