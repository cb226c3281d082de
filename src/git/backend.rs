use crate::error::Result;
use std::path::Path;

/// The three version-control primitives the driver consumes.
pub trait VcsBackend {
    fn stage(&mut self, paths: &[&Path]) -> Result<()>;

    /// Commit staged changes, overriding both author and committer dates.
    fn commit(&mut self, message: &str, author_date: &str, commit_date: &str) -> Result<()>;

    fn push(&mut self, remote: &str, branch: &str, set_upstream: bool) -> Result<()>;
}
