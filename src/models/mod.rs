// src/models/mod.rs

//! Domain models for the knowledge bot.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod document;
mod page;
mod stats;

// Re-export all public types
pub use config::{
    Config, CrawlSettings, DocumentLabels, FormatSettings, OutputSettings, QualitySettings,
    SearchSettings,
};
pub use document::Document;
pub use page::{CodeSample, Language, LanguageRule, RawPage};
pub use stats::RunStats;
