// src/pipeline/search.rs

//! Topic-driven search mode.

use std::time::Duration;

use rand::Rng;

use crate::models::RunStats;
use crate::services::SearchProvider;
use crate::utils::console;

use super::Pipeline;

/// Random pause drawn uniformly from `[min, max]` seconds.
pub fn topic_delay((min, max): (f64, f64)) -> Duration {
    if max <= 0.0 || min > max {
        return Duration::ZERO;
    }
    let secs = if min == max {
        min
    } else {
        rand::thread_rng().gen_range(min..=max)
    };
    Duration::from_secs_f64(secs.max(0.0))
}

/// Pause between topics to avoid request bursts.
pub(crate) async fn pause_between_topics(range: (f64, f64)) {
    let delay = topic_delay(range);
    if !delay.is_zero() {
        log::debug!("Sleeping {:.2}s before next topic", delay.as_secs_f64());
        tokio::time::sleep(delay).await;
    }
}

/// Search one topic. Candidates are crawled only when `follow_results` is set,
/// and no more than `budget` new documents are written.
pub(crate) async fn search_topic(
    pipeline: &Pipeline<'_>,
    search: &dyn SearchProvider,
    topic: &str,
    budget: Option<usize>,
) -> RunStats {
    let mut stats = RunStats {
        searched: 1,
        ..RunStats::default()
    };
    console::info(&format!("🔍 Searching topic: {topic}"));

    let candidates = match search.search(topic).await {
        Ok(candidates) => candidates,
        Err(e) => {
            console::warn(&format!("Search failed for '{topic}': {e}"));
            return stats;
        }
    };
    console::sub_item(&format!("{} candidate URL(s)", candidates.len()));

    if !pipeline.config().search_settings.follow_results {
        for url in &candidates {
            console::sub_item(url);
        }
        return stats;
    }

    for url in &candidates {
        if budget.is_some_and(|limit| stats.new_docs >= limit) {
            break;
        }
        let report = pipeline.process_url(url).await;
        stats.merge(&report.stats);
    }
    stats
}

/// Run search mode over `topic`, or over every configured topic.
pub async fn run_search(
    pipeline: &Pipeline<'_>,
    search: &dyn SearchProvider,
    topic: Option<&str>,
) -> RunStats {
    let config = pipeline.config();
    let topics: Vec<String> = match topic {
        Some(topic) => vec![topic.to_string()],
        None => config.search_topics.clone(),
    };

    console::header("Search mode");
    let mut stats = RunStats::default();
    for (i, topic) in topics.iter().enumerate() {
        console::step(i + 1, topics.len(), topic);
        stats.merge(&search_topic(pipeline, search, topic, None).await);
        if i + 1 < topics.len() {
            pause_between_topics(config.crawl_settings.delay_range).await;
        }
    }
    stats
}
