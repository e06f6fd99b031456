//! Content quality scoring.
//!
//! Four independent signals, each capped on its own, summed and clamped:
//!
//! | signal                               | weight              |
//! |--------------------------------------|---------------------|
//! | title present                        | 0.2                 |
//! | body length >= `min_content_length`  | 0.3                 |
//! | at least one code sample             | 0.3                 |
//! | distinct keywords in title or body   | 0.1 each, max 0.2   |
//!
//! Weights are tallied in hundredths so that a page scoring exactly the
//! configured threshold compares equal to it.

use std::collections::HashSet;

use crate::models::{Config, RawPage};

const TITLE_POINTS: u32 = 20;
const LENGTH_POINTS: u32 = 30;
const CODE_POINTS: u32 = 30;
const KEYWORD_POINTS: u32 = 10;
const KEYWORD_CAP: u32 = 20;
const MAX_POINTS: u32 = 100;

/// Scores extracted pages against thresholds and keywords.
#[derive(Debug, Clone)]
pub struct QualityScorer {
    min_content_length: usize,
    threshold: f64,
    keywords: Vec<String>,
}

impl QualityScorer {
    /// Create a scorer. Empty and repeated keywords are ignored.
    pub fn new(min_content_length: usize, threshold: f64, keywords: &[String]) -> Self {
        let mut seen = HashSet::new();
        let keywords = keywords
            .iter()
            .filter(|k| !k.is_empty() && seen.insert(k.as_str()))
            .cloned()
            .collect();

        Self {
            min_content_length,
            threshold,
            keywords,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.quality_settings.min_content_length,
            config.quality_settings.quality_threshold,
            &config.filter_keywords,
        )
    }

    /// Compute the quality score of a page, in `[0.0, 1.0]`.
    pub fn score(&self, page: &RawPage) -> f64 {
        let mut points = 0;

        if !page.title.is_empty() {
            points += TITLE_POINTS;
        }
        if page.body_text.chars().count() >= self.min_content_length {
            points += LENGTH_POINTS;
        }
        if !page.code_blocks.is_empty() {
            points += CODE_POINTS;
        }
        points += (self.keyword_hits(page) * KEYWORD_POINTS).min(KEYWORD_CAP);

        f64::from(points.min(MAX_POINTS)) / 100.0
    }

    /// Whether a score clears the configured threshold (inclusive).
    pub fn accepts(&self, score: f64) -> bool {
        score >= self.threshold
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    fn keyword_hits(&self, page: &RawPage) -> u32 {
        let hits = self
            .keywords
            .iter()
            .filter(|k| page.title.contains(k.as_str()) || page.body_text.contains(k.as_str()))
            .count();
        u32::try_from(hits).unwrap_or(u32::MAX)
    }
}
