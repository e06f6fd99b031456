//! Duplicate detection against the persisted corpus.
//!
//! A page is a duplicate when its title appears verbatim in any existing
//! document. This is a containment check, not a similarity measure: it
//! catches re-publication of the same article and nothing else.

use crate::error::Result;
use crate::storage::CorpusStore;

/// Checks candidate titles against the corpus.
pub struct DuplicateDetector<'a> {
    store: &'a dyn CorpusStore,
}

impl<'a> DuplicateDetector<'a> {
    pub fn new(store: &'a dyn CorpusStore) -> Self {
        Self { store }
    }

    /// Whether `title` already appears in a corpus document.
    ///
    /// Documents that cannot be read are skipped. Only a failure to list the
    /// corpus itself is an error.
    pub async fn is_duplicate(&self, title: &str) -> Result<bool> {
        for name in self.store.list_documents().await? {
            match self.store.read_document(&name).await {
                Ok(content) if content.contains(title) => {
                    log::debug!("Title {:?} already present in {}", title, name);
                    return Ok(true);
                }
                Ok(_) => {}
                Err(e) => log::debug!("Skipping unreadable document {}: {}", name, e),
            }
        }
        Ok(false)
    }
}
