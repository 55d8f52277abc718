//! Disposable git working copy
//!
//! The revert pipeline drives git through [`WorkingCopy`]; the real
//! implementation shells out to the `git` executable.

mod syntax;
mod working_copy;

pub use syntax::{BranchSyntax, GitVersion};
pub use working_copy::{CloneOptions, GitWorkingCopy};

use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Operations a revert run performs against its clone
#[async_trait]
pub trait WorkingCopy: Send + Sync {
    /// Root directory of the clone
    fn path(&self) -> &Path;

    /// Create `branch` from HEAD and switch to it
    async fn create_branch(&self, branch: &str) -> Result<()>;

    /// Switch to an existing branch
    async fn switch_branch(&self, branch: &str) -> Result<()>;

    /// Revert a merge commit against its first parent.
    ///
    /// Conflicts are errors; nothing is resolved automatically.
    async fn revert_merge_commit(&self, oid: &str) -> Result<()>;

    /// Push `branch` to origin
    async fn push(&self, branch: &str) -> Result<()>;

    /// Remove the working copy from disk
    fn cleanup(self) -> Result<()>
    where
        Self: Sized;

    /// Leave the working copy on disk and return its path
    fn keep(self) -> PathBuf
    where
        Self: Sized;
}
