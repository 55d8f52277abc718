//! Revert engine
//!
//! Two-phase pattern:
//! 1. Plan - create `RevertPlan` from the selected pull requests (pure, testable)
//! 2. Execute - branch, revert, push and open the PR (effectful)
//!
//! [`run_with_working_copy`] wraps execution with the run deadline and
//! releases the clone afterwards.

mod execute;
mod guard;
mod plan;

pub use execute::{RevertExecutionResult, execute_revert};
pub use guard::{cancellable, run_with_working_copy};
pub use plan::{RevertPlan, RevertPlanOptions, RevertStep, create_revert_plan};

use async_trait::async_trait;

/// Progress reporting for long-running operations
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called with a human-readable status line
    async fn on_message(&self, message: &str);
}

/// Progress callback that discards every message
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_message(&self, _message: &str) {}
}
