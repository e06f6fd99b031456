// src/pipeline/crawl.rs

//! Single-URL crawl mode.

use crate::utils::console;

use super::{Pipeline, UrlReport, index};

/// Run crawl mode for one URL. Refreshes the index when a document was written.
pub async fn run_crawl(pipeline: &Pipeline<'_>, url: &str) -> UrlReport {
    console::header("Crawl mode");

    let report = pipeline.process_url(url).await;
    let config = pipeline.config();
    if report.stats.new_docs > 0 && config.output_settings.auto_update_index {
        if let Err(e) = index::update_index(pipeline.store(), &config.output_settings.labels).await
        {
            console::warn(&format!("Index update failed: {e}"));
        }
    }

    report
}
