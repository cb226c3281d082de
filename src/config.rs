use crate::error::{PulseError, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_COUNT: u32 = 120;
pub const DEFAULT_BRANCH: &str = "master";
pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_STATUS_FILE: &str = "data.json";

/// Everything the driver needs to know about its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub count: u32,
    pub branch: String,
    pub remote: String,
    /// Relative paths are resolved against `workdir`.
    pub status_file: PathBuf,
    pub workdir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            branch: DEFAULT_BRANCH.to_string(),
            remote: DEFAULT_REMOTE.to_string(),
            status_file: PathBuf::from(DEFAULT_STATUS_FILE),
            workdir: PathBuf::from("."),
        }
    }
}

impl RunConfig {
    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = workdir.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.branch.trim().is_empty() {
            return Err(PulseError::Config("branch name is empty".to_string()));
        }
        if self.remote.trim().is_empty() {
            return Err(PulseError::Config("remote name is empty".to_string()));
        }
        if self.status_file.as_os_str().is_empty() {
            return Err(PulseError::Config("status file path is empty".to_string()));
        }
        Ok(())
    }

    /// Status file location on disk.
    pub fn status_path(&self) -> PathBuf {
        if self.status_file.is_absolute() {
            self.status_file.clone()
        } else {
            self.workdir.join(&self.status_file)
        }
    }

    /// Path handed to `git add`, relative to the working copy when possible.
    pub fn stage_path(&self) -> &Path {
        if self.status_file.is_absolute() {
            self.status_file
                .strip_prefix(&self.workdir)
                .unwrap_or(self.status_file.as_path())
        } else {
            &self.status_file
        }
    }
}
