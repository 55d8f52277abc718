//! Revert planning - pure functions for creating revert plans
//!
//! No I/O happens here. The selected pull requests, default branch and
//! clock are passed in, so plans are easy to unit test.

use crate::error::{Error, Result};
use crate::selection::PullRequestSet;
use crate::types::RenderContext;
use chrono::{DateTime, Utc};

/// A single step in the revert plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevertStep {
    /// Create the revert branch and switch to it
    CreateBranch {
        /// Branch name
        branch: String,
    },
    /// Revert one merge commit
    Revert {
        /// PR number
        pr_number: u64,
        /// PR title (for display)
        pr_title: String,
        /// Abbreviated merge commit ID
        oid: String,
    },
    /// Switch to the branch and push it
    Push {
        /// Branch name
        branch: String,
    },
    /// Open the revert pull request
    OpenPullRequest {
        /// Head branch
        head: String,
        /// PR title
        title: String,
        /// PR body
        body: String,
    },
}

impl std::fmt::Display for RevertStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateBranch { branch } => write!(f, "create branch {branch}"),
            Self::Revert {
                pr_number,
                pr_title,
                oid,
            } => write!(f, "revert #{pr_number} ({oid}): {pr_title}"),
            Self::Push { branch } => write!(f, "push {branch}"),
            Self::OpenPullRequest { head, title, .. } => {
                write!(f, "open pull request \"{title}\" from {head}")
            }
        }
    }
}

/// Options for revert planning
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct RevertPlanOptions {
    /// Commit reverts onto the default branch instead of a new branch
    pub no_branch: bool,
    /// Do not push (also skips the pull request)
    pub no_push: bool,
    /// Do not open a pull request
    pub no_pull_request: bool,
}

/// Revert plan - the functional core output
///
/// Created by `create_revert_plan()` (pure) and executed by
/// `execute_revert()` (effectful).
#[derive(Debug, Clone)]
pub struct RevertPlan {
    /// Pull requests being reverted, in revert order
    pub pulls: PullRequestSet,
    /// Branch the reverts are committed to
    pub branch: String,
    /// Ordered steps to perform
    pub steps: Vec<RevertStep>,
}

impl RevertPlan {
    /// Number of revert steps
    #[must_use]
    pub fn revert_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, RevertStep::Revert { .. }))
            .count()
    }

    /// Whether the plan creates a new branch
    #[must_use]
    pub fn creates_branch(&self) -> bool {
        self.steps
            .iter()
            .any(|s| matches!(s, RevertStep::CreateBranch { .. }))
    }

    /// Whether the plan pushes the branch
    #[must_use]
    pub fn pushes(&self) -> bool {
        self.steps.iter().any(|s| matches!(s, RevertStep::Push { .. }))
    }

    /// Whether the plan opens a pull request
    #[must_use]
    pub fn opens_pull_request(&self) -> bool {
        self.steps
            .iter()
            .any(|s| matches!(s, RevertStep::OpenPullRequest { .. }))
    }
}

/// Create a revert plan (PURE - no I/O, easily testable)
///
/// # Arguments
/// * `pulls` - Selected pull requests, in the order they are reverted
/// * `default_branch` - Branch used when `no_branch` is set
/// * `options` - Which optional steps to skip
/// * `render` - Host and CI context for the PR body
/// * `now` - Clock for the branch name suffix
///
/// # Returns
/// A `RevertPlan`, or an error if the set is empty or a member has no
/// merge commit
pub fn create_revert_plan(
    pulls: PullRequestSet,
    default_branch: &str,
    options: &RevertPlanOptions,
    render: &RenderContext,
    now: DateTime<Utc>,
) -> Result<RevertPlan> {
    if pulls.is_empty() {
        return Err(Error::Internal("no pull requests selected".to_string()));
    }

    let mut steps = Vec::with_capacity(pulls.len() + 3);

    let branch = if options.no_branch {
        default_branch.to_string()
    } else {
        let branch = pulls.branch_at(now);
        steps.push(RevertStep::CreateBranch {
            branch: branch.clone(),
        });
        branch
    };

    for pr in &pulls {
        let oid = pr
            .merge_commit_oid
            .clone()
            .ok_or(Error::MissingMergeCommit(pr.number))?;
        steps.push(RevertStep::Revert {
            pr_number: pr.number,
            pr_title: pr.title.clone(),
            oid,
        });
    }

    if !options.no_push {
        steps.push(RevertStep::Push {
            branch: branch.clone(),
        });
        if !options.no_pull_request {
            steps.push(RevertStep::OpenPullRequest {
                head: branch.clone(),
                title: pulls.title(),
                body: pulls.body(render),
            });
        }
    }

    Ok(RevertPlan {
        pulls,
        branch,
        steps,
    })
}
