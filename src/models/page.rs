//! Extracted page data structures.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Language tag attached to an extracted code sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Typescript,
    Javascript,
    Text,
}

impl Language {
    /// Tag used on fenced code blocks.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Typescript => "typescript",
            Language::Javascript => "javascript",
            Language::Text => "text",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the ordered language table.
///
/// A rule matches when the code contains at least one `any_of` token (if any
/// are given) and every `all_of` token (if any are given).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LanguageRule {
    #[serde(default)]
    pub any_of: Vec<String>,

    #[serde(default)]
    pub all_of: Vec<String>,

    pub language: Language,
}

impl LanguageRule {
    pub fn any_of<I, S>(tokens: I, language: Language) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            any_of: tokens.into_iter().map(Into::into).collect(),
            all_of: Vec::new(),
            language,
        }
    }

    pub fn all_of<I, S>(tokens: I, language: Language) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            any_of: Vec::new(),
            all_of: tokens.into_iter().map(Into::into).collect(),
            language,
        }
    }

    /// Check whether this rule applies to a piece of code.
    pub fn matches(&self, code: &str) -> bool {
        if self.any_of.is_empty() && self.all_of.is_empty() {
            return false;
        }
        let any_ok =
            self.any_of.is_empty() || self.any_of.iter().any(|t| code.contains(t.as_str()));
        let all_ok = self.all_of.iter().all(|t| code.contains(t.as_str()));
        any_ok && all_ok
    }
}

/// A code block pulled from a page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeSample {
    pub code: String,
    pub language: Language,
}

/// Structured result of one extraction pass over a fetched page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPage {
    /// URL the page was fetched from
    pub url: String,

    /// First `h1`, else `<title>`, else empty
    pub title: String,

    /// Visible text, one fragment per line
    pub body_text: String,

    /// Code blocks in document order
    pub code_blocks: Vec<CodeSample>,

    /// When the page was fetched
    pub fetched_at: DateTime<Utc>,
}

impl RawPage {
    /// An empty page for `url`, used when extraction has nothing to work with.
    pub fn empty(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: String::new(),
            body_text: String::new(),
            code_blocks: Vec::new(),
            fetched_at: Utc::now(),
        }
    }
}
