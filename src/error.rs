//! Error types for pr-revert

use thiserror::Error;

/// Errors that can occur while reverting pull requests
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid configuration
    #[error("{0}")]
    Config(String),

    /// `--latest 0`
    #[error("latest must be a positive number")]
    ZeroLatest,

    /// Fewer merged pull requests than requested
    #[error("there are not enough merged pull requests: {available} < {requested}")]
    NotEnoughPullRequests {
        /// Number of merged pull requests available
        available: usize,
        /// Number of pull requests requested
        requested: usize,
    },

    /// No merged pull request falls inside the duration window
    #[error("there were no pull requests merged in the duration: {0}")]
    NoPullRequestsInWindow(String),

    /// Duration expression could not be parsed
    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    /// Pull request exists but was never merged
    #[error("pull request #{0} is not merged")]
    NotMerged(u64),

    /// Pull request does not exist
    #[error("pull request #{0} not found")]
    PullRequestNotFound(u64),

    /// Merged pull request without a merge commit
    #[error("pull request #{0} has no merge commit")]
    MissingMergeCommit(u64),

    /// git executable not found on PATH
    #[error("git executable not found")]
    GitNotFound,

    /// git command failed
    #[error("git {command} failed: {details}")]
    Git {
        /// Command that failed (without credentials)
        command: String,
        /// stderr or spawn error
        details: String,
    },

    /// GitHub API error
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Run cancelled by deadline or interrupt
    #[error("cancelled: {0}")]
    Cancelled(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => {
                // Validation failures carry the useful part in `errors`
                let details = source
                    .errors
                    .as_ref()
                    .map(|errors| {
                        errors
                            .iter()
                            .map(|e| {
                                e.get("message")
                                    .and_then(serde_json::Value::as_str)
                                    .map_or_else(|| e.to_string(), str::to_string)
                            })
                            .collect::<Vec<_>>()
                            .join(", ")
                    })
                    .filter(|d| !d.is_empty());
                match details {
                    Some(details) => Self::GitHubApi(format!("{}: {details}", source.message)),
                    None => Self::GitHubApi(source.message.clone()),
                }
            }
            other => Self::GitHubApi(other.to_string()),
        }
    }
}

/// Result type alias for pr-revert
pub type Result<T> = std::result::Result<T, Error>;
