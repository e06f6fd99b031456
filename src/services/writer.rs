//! Corpus writer: filenames and persistence.

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::Document;
use crate::storage::{CorpusStore, DOCUMENT_EXTENSION, WriteReceipt};

/// Maximum slug length in characters.
const SLUG_MAX_CHARS: usize = 50;

/// Sanitized, lowercase, length-capped form of a title.
///
/// Keeps alphanumerics (any script), spaces, `-` and `_`; everything else is
/// dropped, not substituted.
pub fn slugify(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .map(|c| if c == ' ' { '-' } else { c })
        .collect::<String>()
        .to_lowercase()
        .chars()
        .take(SLUG_MAX_CHARS)
        .collect()
}

/// `<YYYYMMDD>-<slug>.md`
pub fn document_filename(title: &str, date: NaiveDate) -> String {
    format!(
        "{}-{}.{}",
        date.format("%Y%m%d"),
        slugify(title),
        DOCUMENT_EXTENSION
    )
}

/// Persists rendered documents into the corpus.
///
/// Same-day documents with the same slug share a filename; the later write
/// replaces the earlier one and the receipt says so.
pub struct CorpusWriter<'a> {
    store: &'a dyn CorpusStore,
}

impl<'a> CorpusWriter<'a> {
    pub fn new(store: &'a dyn CorpusStore) -> Self {
        Self { store }
    }

    /// Write `markdown` for `doc`, named after its title and generation date.
    pub async fn write(&self, doc: &Document, markdown: &str) -> Result<WriteReceipt> {
        let name = document_filename(&doc.title, doc.generated_at.date_naive());
        self.store.write_document(&name, markdown).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStorage;
    use chrono::{Local, TimeZone};
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn document(title: &str) -> Document {
        Document {
            title: title.to_string(),
            source_url: "https://example.com".into(),
            generated_at: Local.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap(),
            summary: String::new(),
            code_sections: Vec::new(),
            formatted_body: String::new(),
        }
    }

    #[test]
    fn test_slug_strips_special_characters() {
        assert_eq!(slugify("Hello!@#$%^&*() World"), "hello-world");
    }

    #[test]
    fn test_slug_keeps_unicode_and_separators() {
        assert_eq!(slugify("ArkTS 状态管理_v2-beta"), "arkts-状态管理_v2-beta");
    }

    #[test]
    fn test_slug_truncates_to_fifty_chars() {
        let slug = slugify(&"状".repeat(80));
        assert_eq!(slug.chars().count(), 50);
    }

    #[test]
    fn test_filename_is_deterministic() {
        let a = document_filename("Hello World", date());
        let b = document_filename("Hello World", date());
        assert_eq!(a, "20261016-hello-world.md");
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_same_day_same_title_overwrites() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let writer = CorpusWriter::new(&storage);

        let first = writer.write(&document("Hello World"), "first").await.unwrap();
        let second = writer.write(&document("Hello World"), "second").await.unwrap();

        assert_eq!(first.path, second.path);
        assert!(first.path.ends_with("20261016-hello-world.md"));
        assert!(!first.replaced);
        assert!(second.replaced);
        assert_eq!(std::fs::read_to_string(&second.path).unwrap(), "second");
    }
}
