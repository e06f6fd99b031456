//! Service layer for the knowledge bot.
//!
//! This module contains the business logic for:
//! - Page extraction (`PageExtractor`)
//! - Code language tagging (`LanguageDetector`)
//! - Quality scoring (`QualityScorer`)
//! - Duplicate detection (`DuplicateDetector`)
//! - Document synthesis and rendering (`DocumentSynthesizer`)
//! - Corpus persistence (`CorpusWriter`)
//! - Topic search (`SearchProvider`)

mod duplicates;
mod extractor;
mod language;
mod quality;
mod search;
mod synthesizer;
mod writer;

pub use duplicates::DuplicateDetector;
pub use extractor::{PageExtractor, normalize_text};
pub use language::LanguageDetector;
pub use quality::QualityScorer;
pub use search::{SearchProvider, SiteQuerySearch};
pub use synthesizer::DocumentSynthesizer;
pub use writer::{CorpusWriter, document_filename, slugify};
