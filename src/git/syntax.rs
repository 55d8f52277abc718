//! git version detection and branch command syntax

use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").expect("git version pattern is valid")
});

/// Installed git version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GitVersion {
    /// Major version
    pub major: u32,
    /// Minor version
    pub minor: u32,
    /// Patch version
    pub patch: u32,
}

impl GitVersion {
    /// First release with `git switch`
    pub const SWITCH: Self = Self::new(2, 23, 0);

    /// Create a version
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse `git version` output.
    ///
    /// Accepts vendor suffixes such as `2.39.2.windows.1` or
    /// `2.37.1 (Apple Git-137.1)`.
    pub fn parse(output: &str) -> Result<Self> {
        let invalid = || Error::Git {
            command: "version".to_string(),
            details: format!("unrecognized version output: {}", output.trim()),
        };
        let caps = VERSION.captures(output).ok_or_else(invalid)?;
        let part = |i: usize| -> Result<u32> {
            caps.get(i)
                .map_or(Ok(0), |m| m.as_str().parse().map_err(|_| invalid()))
        };
        Ok(Self::new(part(1)?, part(2)?, part(3)?))
    }
}

impl fmt::Display for GitVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Command family used to create and switch branches
///
/// Resolved once per working copy from the installed git version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchSyntax {
    /// `git switch -c` / `git switch` (git 2.23+)
    Switch,
    /// `git checkout -b` / `git checkout`
    Checkout,
}

impl BranchSyntax {
    /// Pick the syntax supported by `version`
    pub fn for_version(version: GitVersion) -> Self {
        if version >= GitVersion::SWITCH {
            Self::Switch
        } else {
            Self::Checkout
        }
    }

    /// Arguments creating `branch` and switching to it
    pub fn create_args(self, branch: &str) -> [&str; 3] {
        match self {
            Self::Switch => ["switch", "-c", branch],
            Self::Checkout => ["checkout", "-b", branch],
        }
    }

    /// Arguments switching to an existing `branch`
    pub fn switch_args(self, branch: &str) -> [&str; 2] {
        match self {
            Self::Switch => ["switch", branch],
            Self::Checkout => ["checkout", branch],
        }
    }
}
