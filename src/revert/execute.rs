//! Revert execution - effectful operations
//!
//! Takes a `RevertPlan` (created by the pure planning functions) and runs
//! it against a working copy and the platform API. The first failing step
//! aborts the run; nothing is retried.

use crate::error::Result;
use crate::git::WorkingCopy;
use crate::platform::PlatformService;
use crate::revert::ProgressCallback;
use crate::revert::plan::{RevertPlan, RevertStep};
use crate::types::CreatedPullRequest;
use tracing::debug;

/// Result of revert execution
#[derive(Debug, Clone, Default)]
pub struct RevertExecutionResult {
    /// Branch the reverts were committed to
    pub branch: String,
    /// PR numbers whose merge commits were reverted, in order
    pub reverted: Vec<u64>,
    /// Whether the branch was pushed
    pub pushed: bool,
    /// Pull request opened for the reverts
    pub pull_request: Option<CreatedPullRequest>,
}

/// Execute the revert plan (EFFECTFUL)
///
/// # Arguments
/// * `plan` - The revert plan to execute
/// * `repo` - Working copy the reverts are committed in
/// * `platform` - Platform service for API calls
/// * `progress` - Progress callback for status updates
pub async fn execute_revert(
    plan: &RevertPlan,
    repo: &dyn WorkingCopy,
    platform: &dyn PlatformService,
    progress: &dyn ProgressCallback,
) -> Result<RevertExecutionResult> {
    let mut result = RevertExecutionResult {
        branch: plan.branch.clone(),
        ..RevertExecutionResult::default()
    };

    for step in &plan.steps {
        debug!(%step, "executing step");
        match step {
            RevertStep::CreateBranch { branch } => {
                progress
                    .on_message(&format!("Creating branch {branch}"))
                    .await;
                repo.create_branch(branch).await?;
            }
            RevertStep::Revert {
                pr_number,
                pr_title,
                oid,
            } => {
                progress
                    .on_message(&format!("Reverting #{pr_number} ({oid}): {pr_title}"))
                    .await;
                repo.revert_merge_commit(oid).await?;
                result.reverted.push(*pr_number);
            }
            RevertStep::Push { branch } => {
                progress.on_message(&format!("Pushing {branch}")).await;
                repo.switch_branch(branch).await?;
                repo.push(branch).await?;
                result.pushed = true;
            }
            RevertStep::OpenPullRequest { head, title, body } => {
                progress
                    .on_message(&format!("Opening pull request: {title}"))
                    .await;
                let created = platform.create_pull_request(head, title, body).await?;
                result.pull_request = Some(created);
            }
        }
    }

    Ok(result)
}
