// src/services/synthesizer.rs

//! Document synthesis service.
//!
//! Builds a [`Document`] from an accepted [`RawPage`] and renders documents
//! as Markdown:
//!
//! ```text
//! # <title>
//!
//! > Source: <url>
//! > Updated: <YYYY-mm-dd HH:MM:SS>
//!
//! ## Overview          summary
//! ## Code Examples     one fenced block per sample (omitted when none)
//! ## Details           formatted body
//! ```

use chrono::Local;

use crate::models::{CodeSample, Config, Document, DocumentLabels, RawPage};

/// Marker appended when the summary falls back to hard truncation.
const ELLIPSIS: char = '…';

/// Service turning extracted pages into normalized documents.
#[derive(Debug, Clone)]
pub struct DocumentSynthesizer {
    max_summary_length: usize,
    terminator: String,
    heading_markers: Vec<String>,
    labels: DocumentLabels,
}

impl DocumentSynthesizer {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_summary_length: config.output_settings.max_summary_length,
            terminator: config.format_settings.sentence_terminator.clone(),
            heading_markers: config.format_settings.heading_markers.clone(),
            labels: config.output_settings.labels.clone(),
        }
    }

    /// Build a document from an accepted page.
    pub fn synthesize(&self, page: &RawPage) -> Document {
        Document {
            title: page.title.clone(),
            source_url: page.url.clone(),
            generated_at: Local::now(),
            summary: self.summarize(&page.body_text),
            code_sections: page.code_blocks.clone(),
            formatted_body: self.format_body(&page.body_text),
        }
    }

    /// Leading sentences of `body` that fit in the summary budget.
    ///
    /// Falls back to a hard cut with an ellipsis when not even the first
    /// sentence fits. Never longer than the budget plus one character.
    pub fn summarize(&self, body: &str) -> String {
        if body.trim().is_empty() {
            return String::new();
        }

        let terminator_len = self.terminator.chars().count();
        let mut summary = String::new();
        let mut length = 0;

        for sentence in body.split(self.terminator.as_str()) {
            if sentence.trim().is_empty() {
                continue;
            }
            let sentence_len = sentence.chars().count();
            if length + sentence_len >= self.max_summary_length {
                break;
            }
            summary.push_str(sentence);
            summary.push_str(&self.terminator);
            length += sentence_len + terminator_len;
        }

        if summary.is_empty() {
            summary = body.chars().take(self.max_summary_length).collect();
            summary.push(ELLIPSIS);
        }
        summary
    }

    /// Trimmed, non-blank lines separated by blank lines, with marker lines
    /// promoted to `###` headings.
    pub fn format_body(&self, body: &str) -> String {
        body.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                if self.is_heading(line) {
                    format!("### {line}")
                } else {
                    line.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn is_heading(&self, line: &str) -> bool {
        self.heading_markers
            .iter()
            .any(|marker| line.contains(marker.as_str()))
    }

    /// Render a document as Markdown.
    pub fn render(&self, doc: &Document) -> String {
        let labels = &self.labels;
        let mut md = format!("# {}\n\n", doc.title);
        md.push_str(&format!("> {}: {}\n", labels.source, doc.source_url));
        md.push_str(&format!(
            "> {}: {}\n\n",
            labels.updated,
            doc.generated_at.format("%Y-%m-%d %H:%M:%S")
        ));

        md.push_str(&format!("## {}\n\n{}\n\n", labels.overview, doc.summary));

        if !doc.code_sections.is_empty() {
            md.push_str(&format!("## {}\n\n", labels.code_examples));
            for (i, sample) in doc.code_sections.iter().enumerate() {
                let heading = labels.example.replace("{n}", &(i + 1).to_string());
                md.push_str(&format!("### {heading}\n\n"));
                md.push_str(&fenced(sample));
                md.push_str("\n\n");
            }
        }

        md.push_str(&format!("## {}\n\n{}\n", labels.details, doc.formatted_body));
        md
    }
}

impl Default for DocumentSynthesizer {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Fence a code sample, using a fence longer than any backtick run inside it.
fn fenced(sample: &CodeSample) -> String {
    let longest_run = sample
        .code
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run.max(2) + 1);
    format!("{fence}{}\n{}\n{fence}", sample.language, sample.code)
}
