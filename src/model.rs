use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// The single record persisted to the status file on every iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub date: String,
}

impl CommitRecord {
    pub fn new(date: impl Into<String>) -> Self {
        Self { date: date.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekBucket {
    pub week: String,
    pub commit_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub year: i32,
    pub total_commits: u32,
    pub buckets: Vec<WeekBucket>,
}

/// How a driver run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every requested commit was pushed.
    Completed,
    /// A mid-loop push failed and the remaining iterations were dropped.
    Halted { remaining: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub requested: u32,
    pub pushed: u32,
    pub write_failures: u32,
    pub final_push_ok: bool,
    pub outcome: Outcome,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Completed
    }
}
