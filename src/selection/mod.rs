//! Pull request selection
//!
//! Narrows the merged pull requests of a repository to the ones a run
//! reverts, and derives the branch, title and body for the revert PR.

mod duration;
mod set;

pub use duration::parse_duration;
pub use set::PullRequestSet;

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use tracing::debug;

/// Which merged pull requests to revert
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Revert the N most recently updated merged PRs
    pub latest: Option<usize>,
    /// Revert PRs merged within this duration expression
    pub until: Option<String>,
    /// Revert exactly this PR
    pub number: Option<u64>,
}

impl Selection {
    /// Whether no criterion was given
    pub const fn is_empty(&self) -> bool {
        self.latest.is_none() && self.until.is_none() && self.number.is_none()
    }

    /// Fail unless at least one criterion was given and `until` parses.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::Config(
                "--latest (-l, PR_REVERT_LATEST) or --until (-u, PR_REVERT_UNTIL) or --number (-n, PR_REVERT_NUMBER) is required"
                    .to_string(),
            ));
        }
        if let Some(ref until) = self.until {
            parse_duration(until)?;
        }
        Ok(())
    }
}

/// Fetch and narrow merged pull requests (EFFECTFUL)
///
/// An explicit number fetches only that PR. Otherwise the first page of
/// merged PRs is fetched. `latest` then `until` are applied to the result,
/// each only when requested.
pub async fn select_pull_requests(
    platform: &dyn PlatformService,
    selection: &Selection,
) -> Result<PullRequestSet> {
    let mut pulls = if let Some(number) = selection.number {
        debug!(number, "selecting single pull request");
        PullRequestSet::from(platform.fetch_merged_pull_request(number).await?)
    } else {
        let pulls = platform.fetch_merged_pull_requests().await?;
        debug!(count = pulls.len(), "fetched merged pull requests");
        PullRequestSet::new(pulls)
    };

    if let Some(latest) = selection.latest {
        pulls = pulls.latest(latest)?;
    }
    if let Some(ref until) = selection.until {
        pulls = pulls.before(until)?;
    }

    debug!(numbers = ?pulls.numbers(), "selected pull requests");
    Ok(pulls)
}
