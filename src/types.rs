//! Core types for pr-revert

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server URL of the public GitHub instance
pub const DEFAULT_SERVER_URL: &str = "https://github.com";

/// A pull request fetched from the hosting platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Web URL for the PR
    pub url: String,
    /// Whether the PR was merged
    pub merged: bool,
    /// When the PR was merged (None if not merged)
    pub merged_at: Option<DateTime<Utc>>,
    /// When the PR was last updated
    pub updated_at: DateTime<Utc>,
    /// Abbreviated object ID of the merge commit
    pub merge_commit_oid: Option<String>,
}

impl PullRequest {
    /// Reject pull requests that were never merged.
    pub fn ensure_merged(self) -> crate::error::Result<Self> {
        if self.merged {
            Ok(self)
        } else {
            Err(crate::error::Error::NotMerged(self.number))
        }
    }
}

/// A pull request opened by pr-revert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedPullRequest {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
}

/// Platform configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Web server URL (e.g. `https://github.com`)
    pub server_url: String,
    /// REST API base URL
    pub api_url: String,
    /// GraphQL endpoint URL
    pub graphql_url: String,
}

impl PlatformConfig {
    /// `owner/name` form of the repository
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// HTTPS clone URL of the repository
    pub fn clone_url(&self) -> String {
        format!(
            "{}/{}/{}.git",
            self.server_url.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }

    /// Whether the repository lives on the public GitHub instance
    pub fn is_default_host(&self) -> bool {
        is_default_host(&self.server_url)
    }
}

/// Whether `server_url` points at the public GitHub instance
pub fn is_default_host(server_url: &str) -> bool {
    server_url.is_empty() || server_url.trim_end_matches('/') == DEFAULT_SERVER_URL
}

/// Details of the CI run pr-revert executes in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiContext {
    /// Repository running the workflow (`owner/name`)
    pub repository: String,
    /// Workflow run ID
    pub run_id: String,
    /// User that triggered the run
    pub actor: Option<String>,
}

/// Inputs that shape the generated pull request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    /// Web server URL of the platform
    pub server_url: String,
    /// CI run, if any
    pub ci: Option<CiContext>,
}

impl RenderContext {
    /// Context for the public host outside CI
    pub fn public() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            ci: None,
        }
    }
}

/// Commit identity configured on the working copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitIdentity {
    /// `user.name`
    pub name: String,
    /// `user.email`
    pub email: String,
}

impl GitIdentity {
    /// Identity for a CI run: the triggering actor, or the Actions bot.
    pub fn for_ci(ci: &CiContext) -> Self {
        match ci.actor.as_deref().filter(|a| !a.is_empty()) {
            Some(actor) => Self {
                name: actor.to_string(),
                email: format!("{actor}@users.noreply.github.com"),
            },
            None => Self {
                name: "github-actions".to_string(),
                email: "github-actions@github.com".to_string(),
            },
        }
    }
}
