//! Ordered set of merged pull requests and the values derived from it
//!
//! All functions here are pure: narrowing never reorders, and the branch,
//! title and body are computed from the members alone (plus the clock for
//! the branch suffix and the duration window).

use crate::error::{Error, Result};
use crate::selection::duration::parse_duration;
use crate::types::{PullRequest, RenderContext, is_default_host};
use chrono::{DateTime, Utc};

/// Merged pull requests, most recently updated first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestSet {
    pulls: Vec<PullRequest>,
}

impl PullRequestSet {
    /// Wrap pull requests in the order the platform returned them
    pub const fn new(pulls: Vec<PullRequest>) -> Self {
        Self { pulls }
    }

    /// Number of pull requests in the set
    pub const fn len(&self) -> usize {
        self.pulls.len()
    }

    /// Whether the set is empty
    pub const fn is_empty(&self) -> bool {
        self.pulls.is_empty()
    }

    /// Iterate members in set order
    pub fn iter(&self) -> std::slice::Iter<'_, PullRequest> {
        self.pulls.iter()
    }

    /// Member numbers in set order
    pub fn numbers(&self) -> Vec<u64> {
        self.pulls.iter().map(|pr| pr.number).collect()
    }

    /// Keep the first `n` pull requests.
    pub fn latest(self, n: usize) -> Result<Self> {
        if n == 0 {
            return Err(Error::ZeroLatest);
        }
        if self.pulls.len() < n {
            return Err(Error::NotEnoughPullRequests {
                available: self.pulls.len(),
                requested: n,
            });
        }
        let mut pulls = self.pulls;
        pulls.truncate(n);
        Ok(Self { pulls })
    }

    /// Keep pull requests merged within `expr` of now.
    pub fn before(self, expr: &str) -> Result<Self> {
        self.before_at(expr, Utc::now())
    }

    /// Keep pull requests merged within `expr` of `now`.
    ///
    /// Pull requests without a merge timestamp never match. An empty result
    /// is an error rather than an empty set.
    pub fn before_at(self, expr: &str, now: DateTime<Utc>) -> Result<Self> {
        let window = parse_duration(expr)?;
        let pulls: Vec<PullRequest> = self
            .pulls
            .into_iter()
            .filter(|pr| {
                pr.merged_at
                    .is_some_and(|merged_at| now.signed_duration_since(merged_at) < window)
            })
            .collect();

        if pulls.is_empty() {
            return Err(Error::NoPullRequestsInWindow(expr.to_string()));
        }
        Ok(Self { pulls })
    }

    /// Branch name for the reverts, suffixed with the current unix time.
    pub fn branch(&self) -> String {
        self.branch_at(Utc::now())
    }

    /// Branch name for the reverts, suffixed with `now` as unix seconds.
    ///
    /// Repeated runs within the same second collide.
    pub fn branch_at(&self, now: DateTime<Utc>) -> String {
        let numbers: Vec<String> = self.pulls.iter().map(|pr| pr.number.to_string()).collect();
        format!("revert-{}-{}", numbers.join("-"), now.timestamp())
    }

    /// Title of the revert pull request, e.g. `Revert #12 #15`
    pub fn title(&self) -> String {
        let numbers: Vec<String> = self.pulls.iter().map(|pr| format!("#{}", pr.number)).collect();
        format!("Revert {}", numbers.join(" "))
    }

    /// Body of the revert pull request.
    ///
    /// On the public host members are plain `#N` references (GitHub links
    /// them); elsewhere each line is a markdown link. Inside CI a footer
    /// names the workflow run.
    pub fn body(&self, ctx: &RenderContext) -> String {
        let plain = is_default_host(&ctx.server_url);
        let lines: Vec<String> = self
            .pulls
            .iter()
            .map(|pr| {
                if plain {
                    format!("- #{}", pr.number)
                } else {
                    format!("- [**{}** #{}]({})", pr.title, pr.number, pr.url)
                }
            })
            .collect();

        let footer = ctx.ci.as_ref().map_or_else(String::new, |ci| {
            format!(
                "\n---\nCreated by {}/{}/actions/runs/{}\n",
                ctx.server_url.trim_end_matches('/'),
                ci.repository,
                ci.run_id
            )
        });

        format!("Reverted pull requests:\n\n{}\n{footer}", lines.join("\n"))
    }
}

impl From<PullRequest> for PullRequestSet {
    fn from(pr: PullRequest) -> Self {
        Self { pulls: vec![pr] }
    }
}

impl IntoIterator for PullRequestSet {
    type Item = PullRequest;
    type IntoIter = std::vec::IntoIter<PullRequest>;

    fn into_iter(self) -> Self::IntoIter {
        self.pulls.into_iter()
    }
}

impl<'a> IntoIterator for &'a PullRequestSet {
    type Item = &'a PullRequest;
    type IntoIter = std::slice::Iter<'a, PullRequest>;

    fn into_iter(self) -> Self::IntoIter {
        self.pulls.iter()
    }
}
