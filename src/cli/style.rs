//! Terminal styling helpers
//!
//! Output goes through `anstream`, which strips the escapes when stdout is
//! not a terminal.

use indicatif::ProgressStyle;
use owo_colors::OwoColorize;
use std::fmt::Display;

/// Check mark for completed steps
pub const CHECK: &str = "✓";

/// Semantic styles for CLI output
pub trait Stylize: Display + Sized {
    /// Bold
    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    /// Highlighted value (numbers, branch names)
    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    /// Secondary information
    fn muted(&self) -> String {
        self.dimmed().to_string()
    }

    /// Completed successfully
    fn success(&self) -> String {
        self.green().to_string()
    }

    /// Non-fatal problem
    fn warn(&self) -> String {
        self.yellow().to_string()
    }

    /// Fatal problem
    fn error(&self) -> String {
        self.red().bold().to_string()
    }
}

impl<T: Display> Stylize for T {}

/// Green check mark
pub fn check() -> String {
    CHECK.success()
}

/// Step arrow
pub fn arrow() -> String {
    "→".muted()
}

/// Style for spinners around network and git operations
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
}
