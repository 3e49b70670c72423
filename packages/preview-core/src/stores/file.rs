//! File-system persistence backend.
//!
//! Each slot is one `<slot>.json` file under a directory. Writes replace
//! the whole file; there is no cross-slot atomicity (accepted for a
//! client-side cache).

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{PreviewError, Result};
use crate::traits::backend::StorageBackend;

/// Durable slot storage backed by JSON files.
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    /// Create a backend rooted at a directory.
    ///
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the slot files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }
}

#[async_trait]
impl StorageBackend for JsonFileBackend {
    async fn load(&self, slot: &str) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.slot_path(slot)).await {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PreviewError::Storage(Box::new(e))),
        }
    }

    async fn store(&self, slot: &str, payload: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| PreviewError::Storage(Box::new(e)))?;
        tokio::fs::write(self.slot_path(slot), payload)
            .await
            .map_err(|e| PreviewError::Storage(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_slot_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path());
        assert_eq!(backend.load("extract-templates").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("nested"));

        backend.store("extract-results", "[1,2,3]").await.unwrap();
        assert_eq!(
            backend.load("extract-results").await.unwrap(),
            Some("[1,2,3]".to_string())
        );
        assert!(backend.dir().join("extract-results.json").exists());
    }
}
