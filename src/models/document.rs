//! Synthesized document data structure.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::models::CodeSample;

/// A normalized document ready to be written to the corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document title, taken from the page
    pub title: String,

    /// URL the content came from
    pub source_url: String,

    /// When the document was synthesized
    pub generated_at: DateTime<Local>,

    /// Leading sentences of the body
    pub summary: String,

    /// Code samples in extraction order
    pub code_sections: Vec<CodeSample>,

    /// Body text with headings promoted and paragraphs separated
    pub formatted_body: String,
}
