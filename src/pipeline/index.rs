//! Corpus index generation.
//!
//! Regenerates the reserved `00-INDEX.md` listing every document in the
//! corpus with its title and a relative link. The index is a reserved entry,
//! so it never feeds back into duplicate detection or into itself.

use chrono::Local;

use crate::error::Result;
use crate::models::DocumentLabels;
use crate::storage::{CorpusStore, INDEX_FILE, WriteReceipt};

/// One indexed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub file_name: String,
    pub title: String,
}

/// Title of a rendered document: its first `# ` line, if any.
pub fn document_title(markdown: &str) -> Option<&str> {
    markdown
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(str::trim)
        .filter(|title| !title.is_empty())
}

/// Collect index entries for every readable document, in filename order.
pub async fn collect_entries(store: &dyn CorpusStore) -> Result<Vec<IndexEntry>> {
    let mut entries = Vec::new();
    for file_name in store.list_documents().await? {
        let title = match store.read_document(&file_name).await {
            Ok(content) => document_title(&content)
                .map(str::to_string)
                .unwrap_or_else(|| file_name.clone()),
            Err(e) => {
                log::debug!("Indexing {} by filename: {}", file_name, e);
                file_name.clone()
            }
        };
        entries.push(IndexEntry { file_name, title });
    }
    Ok(entries)
}

/// Render the index Markdown.
pub fn render_index(entries: &[IndexEntry], labels: &DocumentLabels) -> String {
    let mut md = format!("# {}\n\n", labels.index_title);
    md.push_str(&format!(
        "> {}: {}\n\n",
        labels.updated,
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    for entry in entries {
        md.push_str(&format!(
            "- [{}](./{})\n",
            entry.title.replace(']', "\\]"),
            entry.file_name.replace(' ', "%20")
        ));
    }
    md
}

/// Rebuild and persist the corpus index.
pub async fn update_index(
    store: &dyn CorpusStore,
    labels: &DocumentLabels,
) -> Result<WriteReceipt> {
    let entries = collect_entries(store).await?;
    let receipt = store
        .write_document(INDEX_FILE, &render_index(&entries, labels))
        .await?;
    log::info!(
        "Index updated: {} documents in {}",
        entries.len(),
        receipt.path.display()
    );
    Ok(receipt)
}
