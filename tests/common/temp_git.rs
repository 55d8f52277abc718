//! Bare git remote with real merge commits, for working copy tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A scratch repository pushed to a local bare remote.
///
/// History is built with `--no-ff` merges on `main` so every merge has two
/// parents, as merged pull requests do.
pub struct TempGitRemote {
    root: TempDir,
    work: PathBuf,
    bare: PathBuf,
}

impl TempGitRemote {
    /// Create an empty-ish remote whose `main` holds one initial commit
    pub fn new() -> Self {
        let root = TempDir::new().expect("create temp dir");
        let work = root.path().join("work");
        let bare = root.path().join("remote.git");
        std::fs::create_dir(&work).expect("create work dir");

        let remote = Self { root, work, bare };
        remote.git(&["init", "-q", "-b", "main"]);
        remote.write("README.md", "widgets\n");
        remote.git(&["add", "."]);
        remote.git(&["commit", "-q", "-m", "Initial commit"]);
        remote
    }

    /// Merge a one-commit feature branch writing `file` into `main`.
    ///
    /// Returns the merge commit id.
    pub fn merge_feature(&self, branch: &str, file: &str, contents: &str) -> String {
        self.git(&["checkout", "-q", "-b", branch]);
        self.write(file, contents);
        self.git(&["add", "."]);
        self.git(&["commit", "-q", "-m", &format!("Add {file}")]);
        self.git(&["checkout", "-q", "main"]);
        self.git(&[
            "merge",
            "-q",
            "--no-ff",
            branch,
            "-m",
            &format!("Merge branch '{branch}'"),
        ]);
        self.git(&["rev-parse", "HEAD"])
    }

    /// Publish the scratch history as a bare repository.
    ///
    /// The remote honors `--filter`, so clones from it are partial and
    /// fetch old trees on demand, as clones from GitHub do.
    pub fn publish(&self) {
        let bare = self.bare.to_str().expect("utf-8 path");
        self.git(&["clone", "-q", "--bare", ".", bare]);
        for key in ["uploadpack.allowFilter", "uploadpack.allowAnySHA1InWant"] {
            self.git_in(&self.bare, &["config", key, "true"]);
        }
    }

    /// Whether the clone at `path` is a partial clone of its origin
    pub fn is_partial_clone(&self, path: &Path) -> bool {
        let output = Command::new("git")
            .args(["config", "--get", "remote.origin.promisor"])
            .current_dir(path)
            .output()
            .expect("run git");
        String::from_utf8_lossy(&output.stdout).trim() == "true"
    }

    /// Make the remote unreachable, as an origin rejecting the request would
    pub fn take_offline(&self) {
        std::fs::rename(&self.bare, self.offline_path()).expect("move remote away");
    }

    /// Undo [`TempGitRemote::take_offline`]
    pub fn bring_online(&self) {
        std::fs::rename(self.offline_path(), &self.bare).expect("restore remote");
    }

    fn offline_path(&self) -> PathBuf {
        self.root.path().join("remote.offline")
    }

    /// URL of the bare remote
    pub fn url(&self) -> String {
        format!("file://{}", self.bare.display())
    }

    /// Path of the bare remote
    pub fn bare_path(&self) -> &Path {
        &self.bare
    }

    /// Whether `branch` exists on the bare remote
    pub fn remote_has_branch(&self, branch: &str) -> bool {
        let output = self.git_in(&self.bare, &["branch", "--list", branch]);
        !output.is_empty()
    }

    /// Subject of the tip commit of `branch` on the bare remote
    pub fn remote_tip_subject(&self, branch: &str) -> String {
        self.git_in(&self.bare, &["log", "-1", "--format=%s", branch])
    }

    /// Whether `file` exists at the tip of `branch` on the bare remote
    pub fn remote_has_file(&self, branch: &str, file: &str) -> bool {
        let output = self.git_in(&self.bare, &["ls-tree", "--name-only", branch]);
        output.lines().any(|name| name == file)
    }

    fn write(&self, file: &str, contents: &str) {
        std::fs::write(self.work.join(file), contents).expect("write file");
    }

    fn git(&self, args: &[&str]) -> String {
        self.git_in(&self.work, args)
    }

    fn git_in(&self, dir: &Path, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(["-c", "commit.gpgsign=false"])
            .args(args)
            .current_dir(dir)
            .env("GIT_AUTHOR_NAME", "Test User")
            .env("GIT_AUTHOR_EMAIL", "test@example.com")
            .env("GIT_COMMITTER_NAME", "Test User")
            .env("GIT_COMMITTER_EMAIL", "test@example.com")
            .output()
            .expect("run git");
        assert!(
            output.status.success(),
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }
}

impl Default for TempGitRemote {
    fn default() -> Self {
        Self::new()
    }
}
