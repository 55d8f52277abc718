//! Hosting platform services
//!
//! One façade per platform covering the reads and the single mutation a
//! revert run needs.

mod github;

pub use github::{GitHubService, MERGED_PAGE_SIZE};

use crate::error::Result;
use crate::types::{CreatedPullRequest, PlatformConfig, PullRequest};
use async_trait::async_trait;

/// Platform service trait for pull request operations
///
/// The orchestrator only ever sees this trait, so the REST and GraphQL
/// transports behind an implementation stay an implementation detail.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Default branch of the repository, resolved at construction
    fn default_branch(&self) -> &str;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;

    /// Fetch one pull request by number.
    ///
    /// Fails if the PR does not exist or was not merged.
    async fn fetch_merged_pull_request(&self, number: u64) -> Result<PullRequest>;

    /// Fetch merged pull requests, most recently updated first.
    ///
    /// Only the first page (see [`MERGED_PAGE_SIZE`]) is returned.
    async fn fetch_merged_pull_requests(&self) -> Result<Vec<PullRequest>>;

    /// Open a pull request from `head` onto the default branch
    async fn create_pull_request(
        &self,
        head: &str,
        title: &str,
        body: &str,
    ) -> Result<CreatedPullRequest>;
}
