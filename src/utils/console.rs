// src/utils/console.rs

//! Operator-facing status output with server-style formatting.
//!
//! Diagnostics go through the `log` facade; this module prints the status
//! lines and the end-of-run report an operator watches in the terminal.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Local;

static QUIET: AtomicBool = AtomicBool::new(false);

/// Status line severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

/// Suppress informational status lines. Warnings and errors still print.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

fn quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Whether a line of this level is printed under the current quiet setting.
fn visible(level: Level) -> bool {
    level != Level::Info || !quiet()
}

/// Format a status line with timestamp and level
fn format_line(level: Level, message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("[{}] [{}] {}", timestamp, level.as_str(), message)
}

/// Print an info line
pub fn info(message: &str) {
    if visible(Level::Info) {
        println!("{}", format_line(Level::Info, message));
    }
}

/// Print a warning line
pub fn warn(message: &str) {
    if visible(Level::Warn) {
        eprintln!("{}", format_line(Level::Warn, message));
    }
}

/// Print an error line
pub fn error(message: &str) {
    if visible(Level::Error) {
        eprintln!("{}", format_line(Level::Error, message));
    }
}

/// Print a success line
pub fn success(message: &str) {
    info(&format!("✓ {message}"));
}

/// Print a step in a process
pub fn step(step_num: usize, total: usize, message: &str) {
    info(&format!("[{step_num}/{total}] {message}"));
}

/// Print a header
pub fn header(title: &str) {
    if !visible(Level::Info) {
        return;
    }
    let border = "═".repeat(60);
    println!("{}", format_line(Level::Info, &border));
    println!("{}", format_line(Level::Info, &format!("  {title}")));
    println!("{}", format_line(Level::Info, &border));
}

/// Print an indented sub-item
pub fn sub_item(message: &str) {
    info(&format!("    {message}"));
}

/// Print a summary section. Always shown, even when quiet.
pub fn summary(title: &str, items: &[(&str, String)]) {
    println!();
    println!("{}", format_line(Level::Info, &format!("[SUMMARY] {title}")));
    let width = items.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (key, value) in items {
        let line = format!("    {key:<width$}  {value}");
        println!("{}", format_line(Level::Info, &line));
    }
}
