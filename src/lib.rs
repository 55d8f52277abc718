//! pr-revert - revert merged pull requests
//!
//! Selects merged pull requests (latest N, merged within a window, or one by
//! number), clones the repository, reverts each merge commit on a fresh
//! branch, pushes it and opens a pull request summarizing the reverts.

pub mod config;
pub mod error;
pub mod git;
pub mod platform;
pub mod revert;
pub mod selection;
pub mod types;
