//! CLI plumbing: progress output, debug log and the revert command

mod revert;
pub mod style;

pub use revert::run_revert;

use anstream::{eprintln, println};
use async_trait::async_trait;
use pr_revert::revert::ProgressCallback;
use std::fs::File;
use std::sync::Mutex;
use style::{Stylize, arrow};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// File the debug trace is written to
const DEBUG_LOG_FILE: &str = "pr-revert.debug";

/// Progress callback printing one line per step
#[derive(Debug, Clone, Copy, Default)]
pub struct CliProgress;

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_message(&self, message: &str) {
        println!("{} {message}", arrow());
    }
}

/// Route tracing events to `pr-revert.debug`.
///
/// `PR_REVERT_LOG` overrides the filter (default: this crate at debug).
pub fn init_debug_log() -> std::io::Result<()> {
    let file = File::create(DEBUG_LOG_FILE)?;
    let filter = EnvFilter::try_from_env("PR_REVERT_LOG")
        .unwrap_or_else(|_| EnvFilter::new("pr_revert=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();
    Ok(())
}

/// Print a single error line to stderr
pub fn print_error(message: &str) {
    eprintln!("{} {message}", "error:".error());
}
