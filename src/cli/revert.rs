//! Revert command - revert selected pull requests and open a PR

use crate::cli::CliProgress;
use crate::cli::style::{Stylize, check, spinner_style};
use anstream::println;
use chrono::Utc;
use indicatif::ProgressBar;
use pr_revert::config::RevertConfig;
use pr_revert::error::Result;
use pr_revert::git::{GitWorkingCopy, WorkingCopy};
use pr_revert::platform::{GitHubService, PlatformService};
use pr_revert::revert::{
    RevertExecutionResult, cancellable, create_revert_plan, run_with_working_copy,
};
use pr_revert::selection::select_pull_requests;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Run the revert pipeline.
///
/// The platform client and the selection are resolved before cloning, so
/// selection errors never touch git. Once cloned, the working copy is
/// cleaned up (or kept with `--no-cleanup`) whatever the outcome.
pub async fn run_revert(config: &RevertConfig) -> Result<()> {
    let deadline = config.timeout.map(|timeout| Instant::now() + timeout);

    let platform = with_spinner(
        format!("Connecting to {}...", config.platform.full_name().emphasis()),
        format!("Connected to {}", config.platform.full_name().emphasis()),
        cancellable(
            deadline,
            GitHubService::connect(&config.token, config.platform.clone()),
        ),
    )
    .await?;

    let pulls = with_spinner(
        "Fetching merged pull requests...".to_string(),
        "Fetched merged pull requests".to_string(),
        cancellable(deadline, select_pull_requests(&platform, &config.selection)),
    )
    .await?;

    let plan = create_revert_plan(
        pulls,
        platform.default_branch(),
        &config.plan,
        &config.render_context(),
        Utc::now(),
    )?;
    println!(
        "{} {}",
        "Reverting".emphasis(),
        format!("{} pull request(s) on {}", plan.revert_count(), plan.branch).accent()
    );

    let repo = with_spinner(
        "Cloning repository...".to_string(),
        "Cloned repository".to_string(),
        cancellable(
            deadline,
            GitWorkingCopy::clone_repository(&config.clone_options()),
        ),
    )
    .await?;
    if config.no_cleanup {
        println!(
            "{} {}",
            "temporary working directory:".warn(),
            repo.path().display()
        );
    }

    let result = run_with_working_copy(
        repo,
        &plan,
        &platform,
        &CliProgress,
        deadline,
        config.no_cleanup,
    )
    .await?;

    print_summary(&result);
    Ok(())
}

async fn with_spinner<T>(
    message: String,
    done: String,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = fut.await;
    if result.is_ok() {
        spinner.finish_with_message(format!("{} {done}", check()));
    } else {
        spinner.finish_and_clear();
    }
    result
}

fn print_summary(result: &RevertExecutionResult) {
    println!();
    if let Some(ref pr) = result.pull_request {
        println!(
            "{} {} {}",
            format!("{} Opened pull request", check()).success(),
            format!("#{}", pr.number).accent(),
            pr.html_url
        );
    } else if result.pushed {
        println!(
            "{} {}",
            format!("{} Pushed", check()).success(),
            result.branch.accent()
        );
    } else {
        println!(
            "{} {} {}",
            format!("{} Reverted", check()).success(),
            format!("{} pull request(s) on", result.reverted.len()).muted(),
            result.branch.accent()
        );
    }
}
