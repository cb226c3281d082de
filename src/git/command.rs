//! `git` subprocess backend.

use super::VcsBackend;
use crate::error::{PulseError, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    fn run_checked<I, S>(&self, args: I, env: &[(&str, &str)]) -> Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let shown = args
            .iter()
            .map(|a| a.as_ref().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ");
        debug!(command = %shown, "running git");

        let output = Command::new("git")
            .args(&args)
            .envs(env.iter().copied())
            .current_dir(&self.workdir)
            .output()?;

        if !output.status.success() {
            let status = match output.status.code() {
                Some(code) => format!("exit {code}"),
                None => "terminated by signal".to_string(),
            };
            return Err(PulseError::GitCommand {
                command: shown,
                status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }
}

impl VcsBackend for GitCli {
    /// Paths missing from the working copy are skipped, so a status file
    /// that was never written does not abort the commit.
    #[instrument(skip_all)]
    fn stage(&mut self, paths: &[&Path]) -> Result<()> {
        let present: Vec<&Path> = paths
            .iter()
            .copied()
            .filter(|p| self.workdir.join(p).exists())
            .collect();
        if present.len() < paths.len() {
            debug!(skipped = paths.len() - present.len(), "skipping missing paths");
        }
        if present.is_empty() {
            return Ok(());
        }

        let mut args: Vec<&OsStr> = vec![OsStr::new("add"), OsStr::new("--")];
        args.extend(present.iter().map(|p| p.as_os_str()));
        self.run_checked(args, &[])?;
        Ok(())
    }

    /// Always creates a commit, even when nothing changed since the last one.
    #[instrument(skip_all, fields(date = %author_date))]
    fn commit(&mut self, message: &str, author_date: &str, commit_date: &str) -> Result<()> {
        self.run_checked(
            ["commit", "--allow-empty", "-m", message, "--date", author_date],
            &[("GIT_COMMITTER_DATE", commit_date)],
        )?;
        Ok(())
    }

    #[instrument(skip_all, fields(remote = %remote, branch = %branch))]
    fn push(&mut self, remote: &str, branch: &str, set_upstream: bool) -> Result<()> {
        let mut args = vec!["push"];
        if set_upstream {
            args.push("-u");
        }
        args.extend([remote, branch]);
        self.run_checked(args, &[])?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    pub(crate) fn has_git() -> bool {
        Command::new("git").arg("--version").output().is_ok()
    }

    pub(crate) fn git(dir: &Path, args: &[&str]) -> String {
        let out = Command::new("git").args(args).current_dir(dir).output().unwrap();
        assert!(
            out.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&out.stderr)
        );
        String::from_utf8_lossy(&out.stdout).to_string()
    }

    /// Working copy on `master` with identity configured.
    pub(crate) fn init_repo(dir: &Path) {
        git(dir, &["init"]);
        git(dir, &["symbolic-ref", "HEAD", "refs/heads/master"]);
        git(dir, &["config", "user.email", "you@example.com"]);
        git(dir, &["config", "user.name", "Your Name"]);
        git(dir, &["config", "commit.gpgsign", "false"]);
    }

    #[test]
    fn failing_command_reports_stderr() {
        if !has_git() {
            return;
        }
        let dir = tempdir().unwrap();
        init_repo(dir.path());
        let mut cli = GitCli::new(dir.path());

        let err = cli.push("nowhere", "master", true).unwrap_err();
        match err {
            PulseError::GitCommand { command, stderr, .. } => {
                assert_eq!(command, "push -u nowhere master");
                assert!(!stderr.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unchanged_content_still_commits() {
        if !has_git() {
            return;
        }
        let dir = tempdir().unwrap();
        init_repo(dir.path());
        let mut cli = GitCli::new(dir.path());
        let date = "2025-01-06T12:00:00+00:00";
        fs::write(dir.path().join("data.json"), "{\"date\":\"x\"}\n").unwrap();

        for _ in 0..2 {
            cli.stage(&[Path::new("data.json")]).unwrap();
            cli.commit(date, date, date).unwrap();
        }

        assert_eq!(git(dir.path(), &["rev-list", "--count", "HEAD"]).trim(), "2");
    }

    #[test]
    fn missing_path_is_skipped_when_staging() {
        if !has_git() {
            return;
        }
        let dir = tempdir().unwrap();
        init_repo(dir.path());
        let mut cli = GitCli::new(dir.path());
        let date = "2025-01-06T12:00:00+00:00";

        cli.stage(&[Path::new("missing/data.json")]).unwrap();
        cli.commit(date, date, date).unwrap();

        let logged = git(dir.path(), &["log", "-1", "--format=%aI|%cI|%s"]);
        let parts: Vec<&str> = logged.trim().split('|').collect();
        assert_eq!(parts[2], date);
        assert_eq!(parts[0], parts[1]);
    }
}
