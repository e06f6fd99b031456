// src/pipeline/ingest.rs

//! Per-URL ingestion.
//!
//! ```text
//! Fetched → Extracted → Scored ─┬─ LowQuality
//!                               ├─ Duplicate
//!                               └─ Accepted → Synthesized → Written
//! ```
//!
//! A fetch failure ends the URL in `FetchFailed` before extraction. Every
//! terminal state is reported on the console; none of them abort the run.

use std::path::PathBuf;

use crate::models::{Config, RunStats};
use crate::services::{
    CorpusWriter, DocumentSynthesizer, DuplicateDetector, PageExtractor, QualityScorer,
};
use crate::storage::{CorpusStore, WriteReceipt};
use crate::utils::console;
use crate::utils::http::PageFetcher;

/// Terminal state of one URL.
#[derive(Debug, Clone, PartialEq)]
pub enum UrlOutcome {
    /// The page could not be fetched
    FetchFailed { reason: String },
    /// Score below the configured threshold
    LowQuality { score: f64 },
    /// Title already present in the corpus
    Duplicate { score: f64 },
    /// The corpus could not be scanned for duplicates
    CorpusUnavailable { score: f64, reason: String },
    /// Document persisted
    Written { score: f64, receipt: WriteReceipt },
    /// Document synthesized but not persisted
    WriteFailed { score: f64, reason: String },
}

impl UrlOutcome {
    /// Path of the written document, if any.
    pub fn written_path(&self) -> Option<&PathBuf> {
        match self {
            UrlOutcome::Written { receipt, .. } => Some(&receipt.path),
            _ => None,
        }
    }
}

/// Outcome of one URL plus the counters it contributed.
#[derive(Debug, Clone)]
pub struct UrlReport {
    pub outcome: UrlOutcome,
    pub stats: RunStats,
}

/// The ingestion pipeline: fetch, extract, score, dedup, synthesize, write.
pub struct Pipeline<'a> {
    config: &'a Config,
    fetcher: &'a dyn PageFetcher,
    store: &'a dyn CorpusStore,
    extractor: PageExtractor,
    scorer: QualityScorer,
    synthesizer: DocumentSynthesizer,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a Config,
        fetcher: &'a dyn PageFetcher,
        store: &'a dyn CorpusStore,
    ) -> Self {
        Self {
            config,
            fetcher,
            store,
            extractor: PageExtractor::from_config(config),
            scorer: QualityScorer::from_config(config),
            synthesizer: DocumentSynthesizer::from_config(config),
        }
    }

    pub fn config(&self) -> &Config {
        self.config
    }

    pub fn store(&self) -> &dyn CorpusStore {
        self.store
    }

    /// Run one URL through every stage.
    ///
    /// Stages run strictly in order, so the duplicate scan for this URL
    /// always completes before its write.
    pub async fn process_url(&self, url: &str) -> UrlReport {
        let mut stats = RunStats::default();
        console::info(&format!("Fetching {url}"));

        let html = match self.fetcher.fetch(url).await {
            Ok(html) => html,
            Err(e) => {
                console::warn(&format!("Fetch failed for {url}: {e}"));
                stats.fetch_failures += 1;
                return UrlReport {
                    outcome: UrlOutcome::FetchFailed {
                        reason: e.to_string(),
                    },
                    stats,
                };
            }
        };
        stats.found += 1;

        let page = self.extractor.extract_html(url, &html);
        stats.code_samples += page.code_blocks.len();
        log::debug!(
            "Extracted {:?}: {} chars of text, {} code blocks",
            page.title,
            page.body_text.chars().count(),
            page.code_blocks.len()
        );

        let score = self.scorer.score(&page);
        console::sub_item(&format!("Quality score: {score:.2}"));

        if !self.scorer.accepts(score) {
            console::warn(&format!(
                "✗ {url}: below quality threshold ({score:.2} < {:.2})",
                self.scorer.threshold()
            ));
            stats.low_quality += 1;
            return UrlReport {
                outcome: UrlOutcome::LowQuality { score },
                stats,
            };
        }

        match DuplicateDetector::new(self.store)
            .is_duplicate(&page.title)
            .await
        {
            Ok(false) => {}
            Ok(true) => {
                console::warn(&format!("⚠ {url}: duplicate content, skipped"));
                stats.duplicated += 1;
                return UrlReport {
                    outcome: UrlOutcome::Duplicate { score },
                    stats,
                };
            }
            Err(e) => {
                console::warn(&format!("Cannot scan corpus for duplicates: {e}"));
                stats.scan_failures += 1;
                return UrlReport {
                    outcome: UrlOutcome::CorpusUnavailable {
                        score,
                        reason: e.to_string(),
                    },
                    stats,
                };
            }
        }

        stats.valid += 1;
        let document = self.synthesizer.synthesize(&page);
        let markdown = self.synthesizer.render(&document);
        console::sub_item(&format!("Generated document: {}", document.title));

        let outcome = match CorpusWriter::new(self.store).write(&document, &markdown).await {
            Ok(receipt) => {
                stats.new_docs += 1;
                if receipt.replaced {
                    stats.updated_docs += 1;
                    console::warn(&format!(
                        "Replaced existing document {}",
                        receipt.path.display()
                    ));
                }
                console::success(&format!("Saved {}", receipt.path.display()));
                log::info!(
                    "Saved document {} ({} bytes)",
                    receipt.path.display(),
                    receipt.bytes
                );
                UrlOutcome::Written { score, receipt }
            }
            Err(e) => {
                console::error(&format!("Failed to save {}: {e}", document.title));
                stats.write_failures += 1;
                UrlOutcome::WriteFailed {
                    score,
                    reason: e.to_string(),
                }
            }
        };

        UrlReport { outcome, stats }
    }
}
