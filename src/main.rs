//! pr-revert CLI

mod cli;

use clap::Parser;
use clap::builder::FalseyValueParser;
use pr_revert::config::{ConfigInput, RevertConfig};
use std::process::ExitCode;

/// pr-revert is a tool for reverting pull requests.
#[derive(Parser)]
#[command(name = "pr-revert", version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)]
struct Args {
    /// Number of most recently merged pull requests to revert
    #[arg(short, long, env = "PR_REVERT_LATEST", value_name = "N")]
    latest: Option<usize>,

    /// Revert pull requests merged within this duration (e.g. 3d, 2w, 1h30m)
    #[arg(short, long, env = "PR_REVERT_UNTIL", value_name = "DURATION")]
    until: Option<String>,

    /// Number of the merged pull request to revert
    #[arg(short, long, env = "PR_REVERT_NUMBER", value_name = "NUMBER")]
    number: Option<u64>,

    /// Do not push branch (implies --no-pull-request)
    #[arg(long, env = "PR_REVERT_NO_PUSH", value_parser = FalseyValueParser::new())]
    no_push: bool,

    /// Do not create a pull request
    #[arg(long, env = "PR_REVERT_NO_PULL_REQUEST", value_parser = FalseyValueParser::new())]
    no_pull_request: bool,

    /// Do not cleanup local repository
    #[arg(long, env = "PR_REVERT_NO_CLEANUP", value_parser = FalseyValueParser::new())]
    no_cleanup: bool,

    /// Do not create branch (commit reverts onto the default branch)
    #[arg(long, env = "PR_REVERT_NO_BRANCH", value_parser = FalseyValueParser::new())]
    no_branch: bool,

    /// Abort the run after this duration
    #[arg(long, env = "PR_REVERT_TIMEOUT", value_name = "DURATION")]
    timeout: Option<String>,

    /// GitHub token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Repository to revert in (owner/name)
    #[arg(long, env = "GITHUB_REPOSITORY", value_name = "OWNER/NAME")]
    repository: Option<String>,

    /// GitHub server URL
    #[arg(long, env = "GITHUB_SERVER_URL", value_name = "URL")]
    server_url: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", value_name = "URL")]
    api_url: Option<String>,

    /// GitHub GraphQL endpoint
    #[arg(long, env = "GITHUB_GRAPHQL_URL", value_name = "URL")]
    graphql_url: Option<String>,

    #[arg(long, env = "CI", hide = true, value_parser = FalseyValueParser::new())]
    ci: bool,

    #[arg(long, env = "GITHUB_RUN_ID", hide = true)]
    run_id: Option<String>,

    #[arg(long, env = "GITHUB_ACTOR", hide = true)]
    actor: Option<String>,

    #[arg(long, env = "DEBUG", hide = true, value_parser = FalseyValueParser::new())]
    debug: bool,
}

impl Args {
    fn into_input(self) -> ConfigInput {
        ConfigInput {
            latest: self.latest,
            until: self.until,
            number: self.number,
            no_push: self.no_push,
            no_pull_request: self.no_pull_request,
            no_cleanup: self.no_cleanup,
            no_branch: self.no_branch,
            timeout: self.timeout,
            token: self.token,
            repository: self.repository,
            server_url: self.server_url,
            api_url: self.api_url,
            graphql_url: self.graphql_url,
            ci: self.ci,
            run_id: self.run_id,
            actor: self.actor,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            if e.print().is_err() {
                cli::print_error(&e.to_string());
            }
            return ExitCode::FAILURE;
        }
    };

    if args.debug
        && let Err(e) = cli::init_debug_log()
    {
        cli::print_error(&format!("failed to create debug log: {e}"));
        return ExitCode::FAILURE;
    }

    let result = match RevertConfig::resolve(args.into_input()) {
        Ok(config) => cli::run_revert(&config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            cli::print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
