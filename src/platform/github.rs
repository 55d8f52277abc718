//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{CreatedPullRequest, PlatformConfig, PullRequest};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Merged pull requests fetched per run. There is no pagination, so older
/// merged PRs are invisible to `--latest` and `--until`.
pub const MERGED_PAGE_SIZE: u32 = 100;

const MERGED_PULL_REQUEST_QUERY: &str = r"
    query MergedPullRequest($owner: String!, $repo: String!, $number: Int!) {
        repository(owner: $owner, name: $repo) {
            pullRequest(number: $number) {
                number
                title
                url
                merged
                mergedAt
                updatedAt
                mergeCommit { abbreviatedOid }
            }
        }
    }
";

const MERGED_PULL_REQUESTS_QUERY: &str = r"
    query MergedPullRequests($owner: String!, $repo: String!, $limit: Int!) {
        repository(owner: $owner, name: $repo) {
            pullRequests(first: $limit, states: [MERGED], orderBy: {direction: DESC, field: UPDATED_AT}) {
                nodes {
                    number
                    title
                    url
                    merged
                    mergedAt
                    updatedAt
                    mergeCommit { abbreviatedOid }
                }
                pageInfo { hasNextPage }
            }
        }
    }
";

// GraphQL response types

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl<T> GraphQlResponse<T> {
    fn is_not_found(&self) -> bool {
        self.errors
            .as_ref()
            .is_some_and(|errors| errors.iter().any(|e| e.kind.as_deref() == Some("NOT_FOUND")))
    }

    fn into_data(self) -> Result<T> {
        if let Some(errors) = self.errors
            && !errors.is_empty()
        {
            let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
            return Err(Error::GitHubApi(format!("GraphQL error: {}", messages.join(", "))));
        }
        self.data.ok_or_else(|| Error::GitHubApi("No data in GraphQL response".to_string()))
    }
}

#[derive(Deserialize)]
struct RepositoryData<T> {
    repository: Option<T>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SinglePullRequest {
    pull_request: Option<GraphQlPullRequest>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MergedPullRequests {
    pull_requests: PullRequestConnection,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestConnection {
    nodes: Vec<GraphQlPullRequest>,
    page_info: PageInfo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlPullRequest {
    number: u64,
    title: String,
    url: String,
    merged: bool,
    merged_at: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
    merge_commit: Option<MergeCommit>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MergeCommit {
    abbreviated_oid: String,
}

impl From<GraphQlPullRequest> for PullRequest {
    fn from(pr: GraphQlPullRequest) -> Self {
        Self {
            number: pr.number,
            title: pr.title,
            url: pr.url,
            merged: pr.merged,
            merged_at: pr.merged_at,
            updated_at: pr.updated_at,
            merge_commit_oid: pr.merge_commit.map(|c| c.abbreviated_oid),
        }
    }
}

/// GitHub service: octocrab for REST, raw GraphQL over reqwest
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
    /// Token for GraphQL requests
    token: String,
    /// HTTP client for GraphQL requests
    http_client: Client,
    default_branch: String,
}

impl GitHubService {
    /// Create a GitHub service and resolve the repository's default branch.
    ///
    /// Fails if the repository cannot be read with `token`.
    pub async fn connect(token: &str, config: PlatformConfig) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(&config.api_url)
            .map_err(|e| Error::GitHubApi(e.to_string()))?
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("pr-revert")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        debug!(repository = %config.full_name(), api_url = %config.api_url, "resolving repository");
        let repository = client.repos(&config.owner, &config.repo).get().await?;
        let default_branch = repository.default_branch.ok_or_else(|| {
            Error::GitHubApi(format!("repository {} has no default branch", config.full_name()))
        })?;
        debug!(%default_branch, "resolved default branch");

        Ok(Self {
            client,
            config,
            token: token.to_string(),
            http_client,
            default_branch,
        })
    }

    /// POST a GraphQL query and decode the envelope
    async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<GraphQlResponse<T>> {
        let response = self
            .http_client
            .post(&self.config.graphql_url)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({
                "query": query,
                "variables": variables,
            }))
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("GraphQL request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::GitHubApi(format!(
                "GraphQL request returned {status}: {}",
                text.trim()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse GraphQL response: {e}")))
    }

    fn repository_missing(&self) -> Error {
        Error::GitHubApi(format!("repository {} not found", self.config.full_name()))
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    fn default_branch(&self) -> &str {
        &self.default_branch
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }

    async fn fetch_merged_pull_request(&self, number: u64) -> Result<PullRequest> {
        debug!(number, "fetching pull request");
        let response: GraphQlResponse<RepositoryData<SinglePullRequest>> = self
            .graphql(
                MERGED_PULL_REQUEST_QUERY,
                serde_json::json!({
                    "owner": self.config.owner,
                    "repo": self.config.repo,
                    "number": number,
                }),
            )
            .await?;

        let not_found = response.is_not_found();
        let pr = match response.into_data() {
            Ok(data) => data
                .repository
                .ok_or_else(|| self.repository_missing())?
                .pull_request,
            Err(_) if not_found => None,
            Err(e) => return Err(e),
        };

        let pr: PullRequest = pr.ok_or(Error::PullRequestNotFound(number))?.into();
        debug!(number, merged = pr.merged, "fetched pull request");
        pr.ensure_merged()
    }

    async fn fetch_merged_pull_requests(&self) -> Result<Vec<PullRequest>> {
        debug!(limit = MERGED_PAGE_SIZE, "fetching merged pull requests");
        let response: GraphQlResponse<RepositoryData<MergedPullRequests>> = self
            .graphql(
                MERGED_PULL_REQUESTS_QUERY,
                serde_json::json!({
                    "owner": self.config.owner,
                    "repo": self.config.repo,
                    "limit": MERGED_PAGE_SIZE,
                }),
            )
            .await?;

        let connection = response
            .into_data()?
            .repository
            .ok_or_else(|| self.repository_missing())?
            .pull_requests;

        if connection.page_info.has_next_page {
            warn!(
                limit = MERGED_PAGE_SIZE,
                "more merged pull requests exist; only the most recently updated are considered"
            );
        }

        let pulls: Vec<PullRequest> = connection.nodes.into_iter().map(Into::into).collect();
        debug!(count = pulls.len(), "fetched merged pull requests");
        Ok(pulls)
    }

    async fn create_pull_request(
        &self,
        head: &str,
        title: &str,
        body: &str,
    ) -> Result<CreatedPullRequest> {
        debug!(head, base = %self.default_branch, "creating PR");
        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .create(title, head, &self.default_branch)
            .body(body)
            .maintainer_can_modify(true)
            .send()
            .await?;

        let created = CreatedPullRequest {
            number: pr.number,
            html_url: pr
                .html_url
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        };
        debug!(pr_number = created.number, "created PR");
        Ok(created)
    }
}
