//! Local filesystem storage implementation.
//!
//! Documents are plain Markdown files in a single directory. Writes go to a
//! temporary sibling first and are renamed into place, so a failed write
//! never leaves a truncated document behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::{CorpusStore, DOCUMENT_EXTENSION, WriteReceipt, is_reserved};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a document name.
    fn path(&self, name: &str) -> PathBuf {
        self.root_dir.join(name)
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        tokio::fs::create_dir_all(&self.root_dir).await?;

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let result = async {
            let mut file = tokio::fs::File::create(&tmp).await?;
            file.write_all(bytes).await?;
            file.flush().await?;
            file.sync_all().await?;
            drop(file);
            tokio::fs::rename(&tmp, path).await
        }
        .await;

        if let Err(e) = result {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                log::debug!("Could not remove {}: {}", tmp.display(), cleanup);
            }
            return Err(AppError::write(path, e));
        }
        Ok(())
    }
}

#[async_trait]
impl CorpusStore for LocalStorage {
    async fn list_documents(&self) -> Result<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(&self.root_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AppError::Io(e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_document = path
                .extension()
                .is_some_and(|ext| ext == DOCUMENT_EXTENSION);
            if !is_document || !entry.file_type().await?.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                log::debug!("Skipping non UTF-8 filename {}", path.display());
                continue;
            };
            if !is_reserved(&name) {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    async fn read_document(&self, name: &str) -> Result<String> {
        Ok(tokio::fs::read_to_string(self.path(name)).await?)
    }

    async fn write_document(&self, name: &str, contents: &str) -> Result<WriteReceipt> {
        let path = self.path(name);
        let replaced = tokio::fs::try_exists(&path).await.unwrap_or(false);

        self.write_bytes(&path, contents.as_bytes()).await?;

        Ok(WriteReceipt {
            path,
            bytes: contents.len(),
            replaced,
        })
    }
}
