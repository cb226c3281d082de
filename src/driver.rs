//! The commit generator: write, stage, commit and push `n` backdated
//! commits, then push once more to finalize.

use crate::config::RunConfig;
use crate::date::{format_date, synthesize, Offsets};
use crate::error::Result;
use crate::git::VcsBackend;
use crate::model::{CommitRecord, Outcome, RunReport};
use crate::status;
use chrono::{DateTime, Local, TimeZone};
use indicatif::ProgressBar;
use rand::rngs::StdRng;
use std::fmt::Display;
use tracing::{error, info, warn};

/// Source of "today".
pub trait Clock {
    type Tz: TimeZone;

    fn now(&self) -> DateTime<Self::Tz>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

pub struct Driver<B, C> {
    backend: B,
    clock: C,
    rng: StdRng,
    config: RunConfig,
    progress: ProgressBar,
}

impl<B, C> Driver<B, C>
where
    B: VcsBackend,
    C: Clock,
    <C::Tz as TimeZone>::Offset: Display,
{
    pub fn new(backend: B, clock: C, rng: StdRng, config: RunConfig) -> Self {
        Self {
            backend,
            clock,
            rng,
            config,
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Draw offsets and build the record for one iteration.
    pub fn next_record(&mut self) -> Result<CommitRecord> {
        let offsets = Offsets::draw(&mut self.rng);
        let date = synthesize(&self.clock.now(), offsets)?;
        Ok(CommitRecord::new(format_date(&date)))
    }

    /// Run `config.count` iterations and the finalize push.
    ///
    /// Stage and commit failures propagate immediately and skip the
    /// finalize push. A failed mid-loop push stops iterating; the finalize
    /// push is still attempted and the report carries `Outcome::Halted`.
    pub fn run(&mut self) -> Result<RunReport> {
        let commit_count = self.config.count;
        let status_path = self.config.status_path();
        let stage_path = self.config.stage_path().to_path_buf();

        let mut report = RunReport {
            requested: commit_count,
            pushed: 0,
            write_failures: 0,
            final_push_ok: false,
            outcome: Outcome::Completed,
        };

        self.progress.set_length(u64::from(commit_count));
        let mut remaining = commit_count;

        // log lines go through `suspend` so they do not tear the bar
        while remaining > 0 {
            let record = self.next_record()?;
            self.progress
                .suspend(|| info!(date = %record.date, "Committing for date"));

            if let Err(err) = status::write_record(&status_path, &record) {
                self.progress.suspend(|| {
                    warn!(path = %status_path.display(), error = %err, "Error writing status file")
                });
                report.write_failures += 1;
            }

            self.backend.stage(&[stage_path.as_path()])?;
            self.backend.commit(&record.date, &record.date, &record.date)?;

            match self.backend.push(&self.config.remote, &self.config.branch, true) {
                Ok(()) => {
                    remaining -= 1;
                    report.pushed += 1;
                    self.progress.inc(1);
                    self.progress.suspend(|| {
                        info!(date = %record.date, remaining, "Successfully pushed commit")
                    });
                }
                Err(err) => {
                    self.progress.suspend(|| {
                        error!(error = %err, remaining, "Error pushing to remote, stopping")
                    });
                    report.outcome = Outcome::Halted { remaining };
                    break;
                }
            }
        }

        self.progress.finish_and_clear();

        match self.backend.push(&self.config.remote, &self.config.branch, true) {
            Ok(()) => {
                report.final_push_ok = true;
                info!(
                    remote = %self.config.remote,
                    branch = %self.config.branch,
                    "Pushed all changes to remote repository"
                );
            }
            Err(err) => error!(error = %err, "Error pushing final changes to remote"),
        }

        Ok(report)
    }
}
