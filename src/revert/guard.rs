//! Deadline and cleanup around an effectful run
//!
//! The working copy is owned here rather than by the cancellable future,
//! so it is removed (or kept) however execution ends.

use crate::error::{Error, Result};
use crate::git::WorkingCopy;
use crate::platform::PlatformService;
use crate::revert::ProgressCallback;
use crate::revert::execute::{RevertExecutionResult, execute_revert};
use crate::revert::plan::RevertPlan;
use std::future::Future;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Race `fut` against `deadline` and Ctrl-C.
///
/// Dropping the losing future kills any git child it spawned.
pub async fn cancellable<T>(
    deadline: Option<Instant>,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    let guarded = async {
        match deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, fut)
                .await
                .unwrap_or_else(|_| Err(Error::Cancelled("deadline exceeded".to_string()))),
            None => fut.await,
        }
    };

    tokio::select! {
        result = guarded => result,
        Ok(()) = tokio::signal::ctrl_c() => Err(Error::Cancelled("interrupted".to_string())),
    }
}

/// Execute `plan` in `repo`, then release the working copy (EFFECTFUL)
///
/// With `keep` the clone stays on disk; otherwise it is removed. A cleanup
/// failure is logged and never replaces the execution result.
pub async fn run_with_working_copy<W: WorkingCopy>(
    repo: W,
    plan: &RevertPlan,
    platform: &dyn PlatformService,
    progress: &dyn ProgressCallback,
    deadline: Option<Instant>,
    keep: bool,
) -> Result<RevertExecutionResult> {
    let result = cancellable(deadline, execute_revert(plan, &repo, platform, progress)).await;
    if let Err(ref e) = result {
        debug!(error = %e, "revert run failed");
    }

    if keep {
        let path = repo.keep();
        debug!(path = %path.display(), "kept working copy");
    } else if let Err(e) = repo.cleanup() {
        warn!(error = %e, "failed to clean up working copy");
    }

    result
}
