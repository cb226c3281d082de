use crate::error::{PulseError, Result};
use chrono::{DateTime, FixedOffset};
use gix::{discover, ObjectId, Repository};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

/// Read-only view of a working copy's history.
pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at `path`, or current dir if `None`
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let repo_path = path
            .map(|p| p.as_ref().to_path_buf())
            .unwrap_or(std::env::current_dir()?);

        let repo = discover(&repo_path)?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Timestamps of every commit reachable from `HEAD`, each visited once,
    /// in the offset they were recorded with.
    pub fn commit_times(&self) -> Result<Vec<DateTime<FixedOffset>>> {
        let mut head = self.repo.head()?;
        if head.is_unborn() {
            return Ok(Vec::new());
        }
        let head_commit = head.peel_to_commit_in_place()?;

        let mut times = Vec::new();
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: VecDeque<ObjectId> = VecDeque::from([head_commit.id]);

        while let Some(commit_id) = stack.pop_back() {
            if !seen.insert(commit_id) {
                continue;
            }

            let commit = self.repo.find_commit(commit_id)?;
            let time = commit.time()?;
            let offset = FixedOffset::east_opt(time.offset)
                .ok_or_else(|| PulseError::InvalidDate(format!("Invalid offset: {}", time.offset)))?;
            let timestamp = DateTime::from_timestamp(time.seconds, 0)
                .ok_or_else(|| PulseError::InvalidDate(format!("Invalid timestamp: {}", time.seconds)))?;
            times.push(timestamp.with_timezone(&offset));

            for pid in commit.parent_ids() {
                stack.push_back(pid.into());
            }
        }

        Ok(times)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::command::tests::{git, has_git, init_repo};
    use tempfile::tempdir;

    #[test]
    fn reads_backdated_commit_times_with_offset() {
        if !has_git() {
            return;
        }
        let dir = tempdir().unwrap();
        init_repo(dir.path());
        for date in ["2025-03-23T10:00:00+02:00", "2025-06-16T08:30:00-05:00"] {
            let out = std::process::Command::new("git")
                .args(["commit", "--allow-empty", "-m", date, "--date", date])
                .env("GIT_COMMITTER_DATE", date)
                .current_dir(dir.path())
                .output()
                .unwrap();
            assert!(out.status.success());
        }
        assert_eq!(git(dir.path(), &["rev-list", "--count", "HEAD"]).trim(), "2");

        let repo = GitRepo::open(Some(dir.path())).unwrap();
        let mut times = repo.commit_times().unwrap();
        times.sort();

        assert_eq!(
            times,
            vec![
                DateTime::parse_from_rfc3339("2025-03-23T10:00:00+02:00").unwrap(),
                DateTime::parse_from_rfc3339("2025-06-16T08:30:00-05:00").unwrap(),
            ]
        );
        assert_eq!(times[1].offset().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn unborn_head_has_no_commits() {
        if !has_git() {
            return;
        }
        let dir = tempdir().unwrap();
        init_repo(dir.path());

        let repo = GitRepo::open(Some(dir.path())).unwrap();
        assert!(repo.commit_times().unwrap().is_empty());
    }
}
