//! Run configuration
//!
//! Flags and environment variables are captured once into [`ConfigInput`]
//! and resolved into a [`RevertConfig`] that is passed to each component.

use crate::error::{Error, Result};
use crate::git::CloneOptions;
use crate::revert::RevertPlanOptions;
use crate::selection::{Selection, parse_duration};
use crate::types::{
    CiContext, DEFAULT_SERVER_URL, GitIdentity, PlatformConfig, RenderContext, is_default_host,
};
use std::time::Duration;
use url::Url;

const DEFAULT_API_URL: &str = "https://api.github.com";
const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// Raw configuration values as given on the command line or environment
#[derive(Debug, Clone, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct ConfigInput {
    /// Number of latest merged PRs (0 = unset)
    pub latest: Option<usize>,
    /// Duration window expression
    pub until: Option<String>,
    /// Single PR number (0 = unset)
    pub number: Option<u64>,
    /// Skip push (and PR)
    pub no_push: bool,
    /// Skip PR creation
    pub no_pull_request: bool,
    /// Keep the clone
    pub no_cleanup: bool,
    /// Commit onto the default branch
    pub no_branch: bool,
    /// Overall deadline expression
    pub timeout: Option<String>,
    /// API token
    pub token: Option<String>,
    /// `owner/name`
    pub repository: Option<String>,
    /// Web server URL
    pub server_url: Option<String>,
    /// REST API base URL override
    pub api_url: Option<String>,
    /// GraphQL endpoint override
    pub graphql_url: Option<String>,
    /// Running in CI
    pub ci: bool,
    /// Workflow run ID
    pub run_id: Option<String>,
    /// User that triggered the run
    pub actor: Option<String>,
}

/// Validated configuration for one run
#[derive(Debug, Clone)]
pub struct RevertConfig {
    /// Which pull requests to revert
    pub selection: Selection,
    /// Which optional steps to skip
    pub plan: RevertPlanOptions,
    /// Keep the clone after the run
    pub no_cleanup: bool,
    /// Overall deadline
    pub timeout: Option<Duration>,
    /// API token
    pub token: String,
    /// Repository and endpoints
    pub platform: PlatformConfig,
    /// CI run, if running in a recognized CI
    pub ci: Option<CiContext>,
}

impl RevertConfig {
    /// Validate raw input.
    ///
    /// Checks, in order: the selection criteria, the token, the repository,
    /// then the timeout and URLs.
    pub fn resolve(input: ConfigInput) -> Result<Self> {
        let selection = Selection {
            latest: input.latest.filter(|&n| n > 0),
            until: non_empty(input.until),
            number: input.number.filter(|&n| n > 0),
        };
        selection.validate()?;

        let token = non_empty(input.token)
            .ok_or_else(|| Error::Config("env GITHUB_TOKEN is not set".to_string()))?;
        let repository = non_empty(input.repository)
            .ok_or_else(|| Error::Config("env GITHUB_REPOSITORY is not set".to_string()))?;
        let (owner, repo) = parse_repository(&repository)?;

        let timeout = non_empty(input.timeout)
            .map(|expr| {
                parse_duration(&expr)?
                    .to_std()
                    .map_err(|_| Error::InvalidDuration(expr.clone()))
            })
            .transpose()?;

        let server_url = non_empty(input.server_url).map_or_else(
            || DEFAULT_SERVER_URL.to_string(),
            |u| u.trim_end_matches('/').to_string(),
        );
        let api_url = match non_empty(input.api_url) {
            Some(url) => url.trim_end_matches('/').to_string(),
            None if is_default_host(&server_url) => DEFAULT_API_URL.to_string(),
            None => format!("{server_url}/api/v3"),
        };
        let graphql_url = match non_empty(input.graphql_url) {
            Some(url) => url,
            None if is_default_host(&server_url) => DEFAULT_GRAPHQL_URL.to_string(),
            None => format!("{server_url}/api/graphql"),
        };
        for (name, value) in [
            ("server URL", &server_url),
            ("API URL", &api_url),
            ("GraphQL URL", &graphql_url),
        ] {
            Url::parse(value).map_err(|e| Error::Config(format!("invalid {name} {value}: {e}")))?;
        }

        let ci = match non_empty(input.run_id) {
            Some(run_id) if input.ci => Some(CiContext {
                repository: repository.clone(),
                run_id,
                actor: non_empty(input.actor),
            }),
            _ => None,
        };

        Ok(Self {
            selection,
            plan: RevertPlanOptions {
                no_branch: input.no_branch,
                no_push: input.no_push,
                no_pull_request: input.no_pull_request,
            },
            no_cleanup: input.no_cleanup,
            timeout,
            token,
            platform: PlatformConfig {
                owner,
                repo,
                server_url,
                api_url,
                graphql_url,
            },
            ci,
        })
    }

    /// Context for rendering the PR body
    pub fn render_context(&self) -> RenderContext {
        RenderContext {
            server_url: self.platform.server_url.clone(),
            ci: self.ci.clone(),
        }
    }

    /// How to clone the repository
    pub fn clone_options(&self) -> CloneOptions {
        CloneOptions {
            remote_url: self.platform.clone_url(),
            token: self.token.clone(),
            identity: self.ci.as_ref().map(GitIdentity::for_ci),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Split `owner/name`
fn parse_repository(repository: &str) -> Result<(String, String)> {
    match repository.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(Error::Config(format!(
            "invalid repository {repository}: expected owner/name"
        ))),
    }
}
