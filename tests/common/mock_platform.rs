//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use crate::common::CallLog;
use async_trait::async_trait;
use pr_revert::error::{Error, Result};
use pr_revert::platform::PlatformService;
use pr_revert::types::{CreatedPullRequest, PlatformConfig, PullRequest};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `create_pull_request`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrCall {
    pub head: String,
    pub title: String,
    pub body: String,
}

/// Simple mock platform service for testing
///
/// Features:
/// - Configurable merged PR list and single-PR responses
/// - Auto-incrementing numbers for created PRs
/// - Call tracking into a log shared with the mock working copy
/// - Error injection for failure path testing
pub struct MockPlatformService {
    config: PlatformConfig,
    default_branch: String,
    next_pr_number: AtomicU64,
    merged_pull_requests: Mutex<Vec<PullRequest>>,
    pull_requests: Mutex<HashMap<u64, PullRequest>>,
    log: CallLog,
    // Call tracking
    create_pr_calls: Mutex<Vec<CreatePrCall>>,
    // Error injection
    error_on_fetch: Mutex<Option<String>>,
    error_on_create_pr: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config, logging into `log`
    pub fn with_config(config: PlatformConfig, log: CallLog) -> Self {
        Self {
            config,
            default_branch: "main".to_string(),
            next_pr_number: AtomicU64::new(100),
            merged_pull_requests: Mutex::new(Vec::new()),
            pull_requests: Mutex::new(HashMap::new()),
            log,
            create_pr_calls: Mutex::new(Vec::new()),
            error_on_fetch: Mutex::new(None),
            error_on_create_pr: Mutex::new(None),
        }
    }

    // === Response setup ===

    /// Set the list returned by `fetch_merged_pull_requests`
    pub fn set_merged_pull_requests(&self, pulls: Vec<PullRequest>) {
        *self.merged_pull_requests.lock().unwrap() = pulls;
    }

    /// Make a PR available to `fetch_merged_pull_request`
    pub fn add_pull_request(&self, pr: PullRequest) {
        self.pull_requests.lock().unwrap().insert(pr.number, pr);
    }

    // === Error injection methods ===

    /// Make both fetch methods return an error
    pub fn fail_fetch(&self, msg: &str) {
        *self.error_on_fetch.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_pull_request` return an error
    pub fn fail_create_pr(&self, msg: &str) {
        *self.error_on_create_pr.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification methods ===

    /// Get all `create_pull_request` calls
    pub fn get_create_pr_calls(&self) -> Vec<CreatePrCall> {
        self.create_pr_calls.lock().unwrap().clone()
    }

    /// Assert that `create_pull_request` was never called
    pub fn assert_no_pr_created(&self) {
        let calls = self.get_create_pr_calls();
        assert!(
            calls.is_empty(),
            "Expected no create_pull_request calls but got: {calls:?}"
        );
    }

    fn record(&self, entry: String) {
        self.log.lock().unwrap().push(entry);
    }

    fn injected_fetch_error(&self) -> Option<Error> {
        self.error_on_fetch
            .lock()
            .unwrap()
            .clone()
            .map(Error::GitHubApi)
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    fn default_branch(&self) -> &str {
        &self.default_branch
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }

    async fn fetch_merged_pull_request(&self, number: u64) -> Result<PullRequest> {
        self.record(format!("fetch_pr:{number}"));
        if let Some(err) = self.injected_fetch_error() {
            return Err(err);
        }
        self.pull_requests
            .lock()
            .unwrap()
            .get(&number)
            .cloned()
            .ok_or(Error::PullRequestNotFound(number))?
            .ensure_merged()
    }

    async fn fetch_merged_pull_requests(&self) -> Result<Vec<PullRequest>> {
        self.record("fetch_prs".to_string());
        if let Some(err) = self.injected_fetch_error() {
            return Err(err);
        }
        Ok(self.merged_pull_requests.lock().unwrap().clone())
    }

    async fn create_pull_request(
        &self,
        head: &str,
        title: &str,
        body: &str,
    ) -> Result<CreatedPullRequest> {
        self.record(format!("create_pr:{head}"));
        self.create_pr_calls.lock().unwrap().push(CreatePrCall {
            head: head.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        });

        if let Some(msg) = self.error_on_create_pr.lock().unwrap().clone() {
            return Err(Error::GitHubApi(msg));
        }

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        Ok(CreatedPullRequest {
            number,
            html_url: format!(
                "https://github.com/{}/{}/pull/{number}",
                self.config.owner, self.config.repo
            ),
        })
    }
}
