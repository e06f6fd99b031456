// src/pipeline/auto.rs

//! Automatic mode: every configured topic, bounded by the per-run document cap.

use crate::models::RunStats;
use crate::services::SearchProvider;
use crate::utils::console;

use super::search::{pause_between_topics, search_topic};
use super::{Pipeline, index};

/// Run auto mode.
///
/// Stops early once `max_documents_per_run` new documents were written, then
/// refreshes the index if enabled.
pub async fn run_auto(pipeline: &Pipeline<'_>, search: &dyn SearchProvider) -> RunStats {
    let config = pipeline.config();
    let max_docs = config.output_settings.max_documents_per_run;
    let topics = &config.search_topics;

    console::header("Auto mode");
    let mut stats = RunStats::default();

    for (i, topic) in topics.iter().enumerate() {
        console::step(i + 1, topics.len(), topic);

        let budget = max_docs.saturating_sub(stats.new_docs);
        stats.merge(&search_topic(pipeline, search, topic, Some(budget)).await);

        if stats.new_docs >= max_docs {
            console::warn(&format!(
                "Reached the per-run document limit ({max_docs}), stopping"
            ));
            break;
        }
        if i + 1 < topics.len() {
            pause_between_topics(config.crawl_settings.delay_range).await;
        }
    }

    if config.output_settings.auto_update_index {
        console::info("📑 Updating index...");
        match index::update_index(pipeline.store(), &config.output_settings.labels).await {
            Ok(receipt) => {
                console::success(&format!("Index written to {}", receipt.path.display()))
            }
            Err(e) => console::warn(&format!("Index update failed: {e}")),
        }
    }

    stats
}
