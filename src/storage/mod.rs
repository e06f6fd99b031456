//! Storage abstractions for the document corpus.
//!
//! ## Directory Structure
//!
//! ```text
//! knowledge/
//! ├── 00-INDEX.md                     # Reserved: regenerated index
//! ├── 20261016-arkts-状态管理.md        # One file per document
//! └── 20261016-arkui-组件.md
//! ```
//!
//! Files starting with [`RESERVED_PREFIX`] are system entries. They are never
//! listed as documents, so duplicate scanning and indexing skip them.

pub mod local;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::Result;

// Re-export for convenience
pub use local::LocalStorage;

/// Filename prefix marking reserved corpus entries.
pub const RESERVED_PREFIX: &str = "00-";

/// Filename of the regenerated corpus index.
pub const INDEX_FILE: &str = "00-INDEX.md";

/// Extension of corpus documents.
pub const DOCUMENT_EXTENSION: &str = "md";

/// Metadata about a completed write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReceipt {
    /// Where the document landed
    pub path: PathBuf,
    /// Bytes written
    pub bytes: usize,
    /// Whether an existing file was replaced
    pub replaced: bool,
}

/// Trait for corpus storage backends.
#[async_trait]
pub trait CorpusStore: Send + Sync {
    /// Names of content documents, sorted, reserved entries excluded.
    async fn list_documents(&self) -> Result<Vec<String>>;

    /// Read a document by name.
    async fn read_document(&self, name: &str) -> Result<String>;

    /// Persist a document atomically: either all of `contents` lands or nothing does.
    async fn write_document(&self, name: &str, contents: &str) -> Result<WriteReceipt>;
}

/// Whether `name` is a reserved (system) corpus entry.
pub fn is_reserved(name: &str) -> bool {
    name.starts_with(RESERVED_PREFIX)
}
