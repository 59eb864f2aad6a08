//! # Document Output
//!
//! Saves generated receipts into the output directory, the desktop
//! counterpart of a browser download.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{DbError, DbResult};

#[derive(Debug, Clone)]
pub struct DocumentStore {
    dir: PathBuf,
}

impl DocumentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DocumentStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `bytes` as `filename`, replacing any existing file.
    ///
    /// Only the final path component of `filename` is used.
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> DbResult<PathBuf> {
        let name = Path::new(filename)
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("document.pdf"));
        let path = self.dir.join(name);

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| DbError::Write {
                path: self.dir.clone(),
                source,
            })?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| DbError::Write {
                path: path.clone(),
                source,
            })?;

        info!(path = %path.display(), bytes = bytes.len(), "Document saved");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_creates_dir_and_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(tmp.path().join("receipts"));

        let path = store.save("FirewoodOrderReceipt.pdf", b"first").await.unwrap();
        store.save("FirewoodOrderReceipt.pdf", b"second").await.unwrap();

        assert_eq!(path, tmp.path().join("receipts").join("FirewoodOrderReceipt.pdf"));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_save_strips_directories_from_name() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(tmp.path());

        let path = store.save("../escape.pdf", b"x").await.unwrap();
        assert_eq!(path, tmp.path().join("escape.pdf"));
    }
}
