//! Local document storage for uploaded files
//!
//! Ingested documents are persisted so the UI layer can offer the original
//! file for download. Filenames are reduced to their final path component
//! before use.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Filesystem store for original document bytes
pub struct DocumentStore {
    storage_dir: PathBuf,
}

impl DocumentStore {
    /// Create a store rooted at `storage_dir`, creating it if needed
    pub fn new(storage_dir: impl Into<PathBuf>) -> Result<Self> {
        let storage_dir = storage_dir.into();
        std::fs::create_dir_all(&storage_dir)?;
        Ok(Self { storage_dir })
    }

    fn document_path(&self, filename: &str) -> Result<PathBuf> {
        let name = Path::new(filename)
            .file_name()
            .ok_or_else(|| Error::Config(format!("invalid document filename: {}", filename)))?;
        Ok(self.storage_dir.join(name))
    }

    /// Persist document bytes, overwriting any previous version
    pub async fn save(&self, filename: &str, data: &[u8]) -> Result<PathBuf> {
        let path = self.document_path(filename)?;
        tokio::fs::write(&path, data).await?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "document stored");
        Ok(path)
    }

    /// Load previously stored document bytes
    pub async fn load(&self, filename: &str) -> Result<Vec<u8>> {
        let path = self.document_path(filename)?;
        Ok(tokio::fs::read(&path).await?)
    }

    /// Check whether a document has been stored
    pub async fn exists(&self, filename: &str) -> Result<bool> {
        let path = self.document_path(filename)?;
        Ok(tokio::fs::try_exists(&path).await?)
    }

    /// Remove a stored document; missing files are not an error
    pub async fn delete(&self, filename: &str) -> Result<()> {
        let path = self.document_path(filename)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path()).unwrap();

        store.save("report.pdf", b"pdf bytes").await.unwrap();
        assert!(store.exists("report.pdf").await.unwrap());
        assert_eq!(store.load("report.pdf").await.unwrap(), b"pdf bytes");

        store.delete("report.pdf").await.unwrap();
        assert!(!store.exists("report.pdf").await.unwrap());
        // Deleting again is fine
        store.delete("report.pdf").await.unwrap();
    }

    #[tokio::test]
    async fn save_overwrites_previous_version() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path()).unwrap();

        store.save("doc.pdf", b"v1").await.unwrap();
        store.save("doc.pdf", b"v2").await.unwrap();
        assert_eq!(store.load("doc.pdf").await.unwrap(), b"v2");
    }

    #[tokio::test]
    async fn filename_is_reduced_to_its_final_component() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path()).unwrap();

        let path = store.save("../../etc/passwd.pdf", b"data").await.unwrap();
        assert_eq!(path.parent().unwrap(), dir.path());
        assert_eq!(path.file_name().unwrap(), "passwd.pdf");
    }
}
