//! Mock working copy for testing

#![allow(dead_code)]

use crate::common::CallLog;
use async_trait::async_trait;
use pr_revert::error::{Error, Result};
use pr_revert::git::WorkingCopy;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tempfile::TempDir;

/// Working copy that records operations instead of running git
///
/// Entries are appended to the shared log as `create_branch:<name>`,
/// `switch:<name>`, `revert:<oid>`, `push:<name>`, `cleanup` and `keep`.
/// The mock owns a real (empty) temporary directory so cleanup can be
/// observed on disk.
pub struct MockWorkingCopy {
    dir: TempDir,
    log: CallLog,
    // Error injection
    fail_revert_oid: Mutex<Option<String>>,
    error_on_push: Mutex<Option<String>>,
    stall_revert: AtomicBool,
}

impl MockWorkingCopy {
    /// Create a mock logging into `log`
    pub fn new(log: CallLog) -> Self {
        Self {
            dir: TempDir::with_prefix("pr-revert-mock").expect("create mock working copy"),
            log,
            fail_revert_oid: Mutex::new(None),
            error_on_push: Mutex::new(None),
            stall_revert: AtomicBool::new(false),
        }
    }

    /// Make reverting `oid` fail as a conflict would
    pub fn fail_revert(&self, oid: &str) {
        *self.fail_revert_oid.lock().unwrap() = Some(oid.to_string());
    }

    /// Make `push` fail
    pub fn fail_push(&self, msg: &str) {
        *self.error_on_push.lock().unwrap() = Some(msg.to_string());
    }

    /// Make every revert hang for an hour, as a stuck fetch would
    pub fn stall_revert(&self) {
        self.stall_revert.store(true, Ordering::SeqCst);
    }

    fn record(&self, entry: String) {
        self.log.lock().unwrap().push(entry);
    }
}

#[async_trait]
impl WorkingCopy for MockWorkingCopy {
    fn path(&self) -> &Path {
        self.dir.path()
    }

    async fn create_branch(&self, branch: &str) -> Result<()> {
        self.record(format!("create_branch:{branch}"));
        Ok(())
    }

    async fn switch_branch(&self, branch: &str) -> Result<()> {
        self.record(format!("switch:{branch}"));
        Ok(())
    }

    async fn revert_merge_commit(&self, oid: &str) -> Result<()> {
        self.record(format!("revert:{oid}"));
        if self.stall_revert.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        let should_fail = self.fail_revert_oid.lock().unwrap().as_deref() == Some(oid);
        if should_fail {
            return Err(Error::Git {
                command: format!("revert -m 1 --no-edit {oid}"),
                details: "CONFLICT (content): Merge conflict in src/lib.rs".to_string(),
            });
        }
        Ok(())
    }

    async fn push(&self, branch: &str) -> Result<()> {
        self.record(format!("push:{branch}"));
        if let Some(msg) = self.error_on_push.lock().unwrap().clone() {
            return Err(Error::Git {
                command: format!("push origin {branch}"),
                details: msg,
            });
        }
        Ok(())
    }

    fn cleanup(self) -> Result<()> {
        self.record("cleanup".to_string());
        self.dir.close()?;
        Ok(())
    }

    fn keep(self) -> PathBuf {
        self.record("keep".to_string());
        self.dir.keep()
    }
}
