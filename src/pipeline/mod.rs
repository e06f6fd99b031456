//! Pipeline entry points for the knowledge bot modes.
//!
//! - `run_search`: Enumerate candidate URLs per topic
//! - `run_crawl`: Ingest a single URL
//! - `run_auto`: Every topic, bounded by the per-run document cap
//! - `run_analyze`: Placeholder

pub mod auto;
pub mod crawl;
pub mod index;
pub mod ingest;
pub mod search;

pub use auto::run_auto;
pub use crawl::run_crawl;
pub use index::update_index;
pub use ingest::{Pipeline, UrlOutcome, UrlReport};
pub use search::run_search;

use chrono::Local;

use crate::models::RunStats;
use crate::utils::console;

/// Analyze mode is not implemented; it only prints a notice.
pub fn run_analyze() {
    console::warn("Analyze mode is not yet available");
}

/// Print the end-of-run report.
pub fn print_report(stats: &RunStats) {
    let mut rows = vec![("Finished at", Local::now().format("%Y-%m-%d %H:%M:%S").to_string())];
    rows.extend(stats.report_rows());
    console::summary("Run report", &rows);
}
