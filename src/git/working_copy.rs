//! git CLI implementation of [`WorkingCopy`]

use crate::error::{Error, Result};
use crate::git::WorkingCopy;
use crate::git::syntax::{BranchSyntax, GitVersion};
use crate::types::GitIdentity;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::debug;

/// How to clone the target repository
#[derive(Debug, Clone)]
pub struct CloneOptions {
    /// HTTPS clone URL, without credentials
    pub remote_url: String,
    /// Token sent as basic auth on clone and push
    pub token: String,
    /// Commit identity to configure on the clone
    pub identity: Option<GitIdentity>,
}

/// A clone in a temporary directory, removed by [`GitWorkingCopy::cleanup`]
/// or on drop
pub struct GitWorkingCopy {
    dir: TempDir,
    syntax: BranchSyntax,
    auth_header: String,
}

impl std::fmt::Debug for GitWorkingCopy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitWorkingCopy")
            .field("dir", &self.dir.path())
            .field("syntax", &self.syntax)
            .finish_non_exhaustive()
    }
}

impl GitWorkingCopy {
    /// Clone the repository into a fresh temporary directory.
    ///
    /// Fails if git is missing or the clone fails; the directory is removed
    /// in that case.
    pub async fn clone_repository(options: &CloneOptions) -> Result<Self> {
        let version = GitVersion::parse(&run_git(None, None, &["version"]).await?)?;
        let syntax = BranchSyntax::for_version(version);
        debug!(%version, ?syntax, "detected git");

        let dir = tempfile::Builder::new().prefix("pr-revert").tempdir()?;
        let path = dir
            .path()
            .to_str()
            .ok_or_else(|| Error::Internal("temporary directory is not valid UTF-8".to_string()))?
            .to_string();
        let auth_header = basic_auth_header(&options.token);

        run_git(
            None,
            Some(&auth_header),
            &["clone", "--filter=tree:0", &options.remote_url, &path],
        )
        .await?;
        debug!(path = %path, "cloned repository");

        let working_copy = Self {
            dir,
            syntax,
            auth_header,
        };

        if let Some(ref identity) = options.identity {
            working_copy
                .git(&["config", "user.name", &identity.name])
                .await?;
            working_copy
                .git(&["config", "user.email", &identity.email])
                .await?;
        }

        Ok(working_copy)
    }

    /// Branch command family in use
    pub const fn syntax(&self) -> BranchSyntax {
        self.syntax
    }

    /// git invocation inside the clone.
    ///
    /// Carries the auth header: with `--filter=tree:0` any command that
    /// reads an old tree (revert, switch) fetches it from origin on demand.
    fn command(&self, args: &[&str]) -> Command {
        git_command(Some(self.dir.path()), Some(&self.auth_header), args)
    }

    async fn git(&self, args: &[&str]) -> Result<String> {
        run_command(self.command(args), args).await
    }
}

#[async_trait]
impl WorkingCopy for GitWorkingCopy {
    fn path(&self) -> &Path {
        self.dir.path()
    }

    async fn create_branch(&self, branch: &str) -> Result<()> {
        self.git(&self.syntax.create_args(branch)).await?;
        Ok(())
    }

    async fn switch_branch(&self, branch: &str) -> Result<()> {
        self.git(&self.syntax.switch_args(branch)).await?;
        Ok(())
    }

    async fn revert_merge_commit(&self, oid: &str) -> Result<()> {
        self.git(&["revert", "-m", "1", "--no-edit", oid]).await?;
        Ok(())
    }

    async fn push(&self, branch: &str) -> Result<()> {
        self.git(&["push", "origin", branch]).await?;
        Ok(())
    }

    fn cleanup(self) -> Result<()> {
        debug!(path = %self.dir.path().display(), "cleanup repository");
        self.dir.close()?;
        Ok(())
    }

    fn keep(self) -> PathBuf {
        self.dir.keep()
    }
}

/// `http.extraheader` value authenticating as `x-access-token`
fn basic_auth_header(token: &str) -> String {
    let credentials = STANDARD.encode(format!("x-access-token:{token}"));
    format!("AUTHORIZATION: basic {credentials}")
}

/// Run git and return trimmed stdout.
///
/// `auth_header` is passed with `-c` for this invocation only and never
/// appears in errors or logs.
async fn run_git(cwd: Option<&Path>, auth_header: Option<&str>, args: &[&str]) -> Result<String> {
    run_command(git_command(cwd, auth_header, args), args).await
}

fn git_command(cwd: Option<&Path>, auth_header: Option<&str>, args: &[&str]) -> Command {
    let mut command = Command::new("git");
    if let Some(header) = auth_header {
        command.arg("-c").arg(format!("http.extraheader={header}"));
    }
    if let Some(dir) = cwd {
        command.arg("-C").arg(dir);
    }
    command
        .args(args)
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::null())
        .kill_on_drop(true);
    command
}

/// Run a prepared git command. `args` names it in logs and errors.
async fn run_command(mut command: Command, args: &[&str]) -> Result<String> {
    let command_line = args.join(" ");

    debug!(command = %command_line, "running git");
    let output = command.output().await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::GitNotFound
        } else {
            Error::Git {
                command: command_line.clone(),
                details: e.to_string(),
            }
        }
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        debug!(command = %command_line, status = %output.status, %stderr, "git failed");
        return Err(Error::Git {
            command: command_line,
            details: if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            },
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
