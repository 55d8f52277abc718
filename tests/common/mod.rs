//! Shared test fixtures

#![allow(dead_code)]

mod mock_git;
mod mock_platform;
mod temp_git;

pub use mock_git::MockWorkingCopy;
pub use mock_platform::{CreatePrCall, MockPlatformService};
pub use temp_git::TempGitRemote;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use pr_revert::types::{PlatformConfig, PullRequest};
use std::sync::{Arc, Mutex};

/// Ordered record of calls across the mock platform and working copy
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// Fresh, empty call log
pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Snapshot of a call log
pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Fixed clock used by planning tests
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
}

/// Platform config for github.com
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        owner: "test-owner".to_string(),
        repo: "test-repo".to_string(),
        server_url: "https://github.com".to_string(),
        api_url: "https://api.github.com".to_string(),
        graphql_url: "https://api.github.com/graphql".to_string(),
    }
}

/// Merged PR whose merge commit is `oid<number>`
pub fn make_pr(number: u64, merged_at: DateTime<Utc>) -> PullRequest {
    PullRequest {
        number,
        title: format!("Change {number}"),
        url: format!("https://github.com/test-owner/test-repo/pull/{number}"),
        merged: true,
        merged_at: Some(merged_at),
        updated_at: merged_at,
        merge_commit_oid: Some(format!("oid{number}")),
    }
}

/// Merged PR merged `ago` before `now`
pub fn merged_ago(number: u64, now: DateTime<Utc>, ago: TimeDelta) -> PullRequest {
    make_pr(number, now - ago)
}

/// PR that was closed without merging
pub fn unmerged_pr(number: u64) -> PullRequest {
    PullRequest {
        merged: false,
        merged_at: None,
        merge_commit_oid: None,
        ..make_pr(number, fixed_now())
    }
}

/// Merged PRs numbered `numbers`, each an hour older than the previous
pub fn merged_list(numbers: &[u64], now: DateTime<Utc>) -> Vec<PullRequest> {
    numbers
        .iter()
        .zip(1..)
        .map(|(&number, hours)| merged_ago(number, now, TimeDelta::hours(hours)))
        .collect()
}
