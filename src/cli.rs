use crate::config::{DEFAULT_BRANCH, DEFAULT_COUNT, DEFAULT_REMOTE, DEFAULT_STATUS_FILE};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "gitpulse")]
#[command(about = "Generate backdated commits to fill a repository activity graph")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, global = true, help = "Path to git working copy (default: current directory)")]
    pub repo: Option<PathBuf>,

    #[arg(short, long, global = true, conflicts_with = "quiet", help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Only log warnings and errors")]
    pub quiet: bool,
}

#[derive(Args, Clone)]
pub struct RunArgs {
    #[arg(long, default_value_t = DEFAULT_COUNT, help = "Number of commits to generate")]
    pub count: u32,

    #[arg(long, default_value = DEFAULT_BRANCH, help = "Branch to push")]
    pub branch: String,

    #[arg(long, default_value = DEFAULT_REMOTE, help = "Remote to push to")]
    pub remote: String,

    #[arg(long, default_value = DEFAULT_STATUS_FILE, help = "Status file rewritten on every commit")]
    pub file: PathBuf,

    #[arg(long, help = "Seed for reproducible commit dates")]
    pub seed: Option<u64>,

    #[arg(long, help = "Hide the progress bar")]
    pub no_progress: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write, commit and push backdated commits
    Run(RunArgs),
    /// Show commits per week for a year
    Graph {
        #[arg(long, help = "Calendar year to show (default: current year)")]
        year: Option<i32>,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, conflicts_with = "json", help = "Output as NDJSON")]
        ndjson: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<ExitCode> {
        crate::logging::init(self.common.verbose, self.common.quiet);

        match self.command {
            Commands::Run(args) => crate::run::exec(&self.common, args),
            Commands::Graph { year, json, ndjson } => {
                crate::graph::exec(&self.common, year, json, ndjson)?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_defaults_match_config_defaults() {
        let cli = Cli::try_parse_from(["gitpulse", "run"]).unwrap();
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.count, 120);
                assert_eq!(args.branch, "master");
                assert_eq!(args.remote, "origin");
                assert_eq!(args.file, PathBuf::from("data.json"));
                assert_eq!(args.seed, None);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn negative_count_is_rejected() {
        assert!(Cli::try_parse_from(["gitpulse", "run", "--count", "-1"]).is_err());
    }

    #[test]
    fn repo_is_global() {
        let cli = Cli::try_parse_from(["gitpulse", "graph", "--repo", "/tmp/x", "--json"]).unwrap();
        assert_eq!(cli.common.repo, Some(PathBuf::from("/tmp/x")));
    }
}
