// src/services/extractor.rs

//! Page extraction service.
//!
//! Turns a parsed HTML document into a [`RawPage`]: title, visible body text
//! and code blocks. Extraction never fails; a document with nothing useful in
//! it yields a page with empty fields.

use std::sync::LazyLock;

use chrono::Utc;
use scraper::{ElementRef, Html, Node, Selector};

use crate::models::{CodeSample, Config, RawPage};
use crate::services::LanguageDetector;

static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").expect("valid selector"));
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("valid selector"));
static CODE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("code, pre").expect("valid selector"));

/// Elements whose text never counts as body content.
const SKIPPED_ELEMENTS: [&str; 2] = ["script", "style"];

/// Service for extracting structured content from pages.
#[derive(Debug, Clone)]
pub struct PageExtractor {
    min_code_length: usize,
    detector: LanguageDetector,
}

impl PageExtractor {
    /// Create an extractor keeping code blocks of at least `min_code_length` characters.
    pub fn new(min_code_length: usize, detector: LanguageDetector) -> Self {
        Self {
            min_code_length,
            detector,
        }
    }

    /// Build an extractor from the quality settings and language table.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.quality_settings.min_code_lines,
            LanguageDetector::new(config.language_rules.clone()),
        )
    }

    /// Parse raw markup and extract it.
    pub fn extract_html(&self, url: &str, html: &str) -> RawPage {
        let document = Html::parse_document(html);
        self.extract(url, &document)
    }

    /// Extract a page from an already parsed document.
    pub fn extract(&self, url: &str, document: &Html) -> RawPage {
        RawPage {
            url: url.to_string(),
            title: Self::extract_title(document),
            body_text: Self::extract_body(document),
            code_blocks: self.extract_code(document),
            fetched_at: Utc::now(),
        }
    }

    /// First `h1`, falling back to `<title>`, falling back to empty.
    fn extract_title(document: &Html) -> String {
        document
            .select(&H1)
            .next()
            .or_else(|| document.select(&TITLE).next())
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default()
    }

    /// All visible text with script/style removed, one fragment per line.
    fn extract_body(document: &Html) -> String {
        let mut raw = String::new();

        for node in document.root_element().descendants() {
            let Node::Text(text) = node.value() else {
                continue;
            };
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name()))
            });
            if !hidden {
                raw.push_str(text);
            }
        }

        normalize_text(&raw)
    }

    /// Every `code`/`pre` block long enough to keep, in document order.
    fn extract_code(&self, document: &Html) -> Vec<CodeSample> {
        document
            .select(&CODE)
            .filter_map(|el| self.code_sample(el))
            .collect()
    }

    fn code_sample(&self, el: ElementRef<'_>) -> Option<CodeSample> {
        let text: String = el.text().collect();
        let code = text.trim();
        if code.chars().count() < self.min_code_length {
            return None;
        }
        Some(CodeSample {
            code: code.to_string(),
            language: self.detector.detect(code),
        })
    }
}

impl Default for PageExtractor {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Collapse text into trimmed, non-empty fragments joined by newlines.
///
/// Lines are split further on double spaces, which is how inline layout
/// whitespace usually survives text extraction.
pub fn normalize_text(raw: &str) -> String {
    raw.lines()
        .flat_map(|line| line.trim().split("  "))
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
