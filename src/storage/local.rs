//! Local filesystem storage implementation.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! └── {slug}/
//!     └── index.md
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::storage::ContentStorage;

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

    /// Get the full path for a relative key.
    fn path(&self, key: impl AsRef<Path>) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Write bytes to a relative key atomically.
    pub async fn write_bytes(&self, key: impl AsRef<Path>, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path(key);
        write_atomic(&path, bytes).await?;
        Ok(path)
    }
}

#[async_trait]
impl ContentStorage for LocalStorage {
    async fn write_document(
        &self,
        slug: &str,
        file_name: &str,
        contents: &str,
    ) -> Result<PathBuf> {
        let key = Path::new(slug).join(file_name);
        self.write_bytes(key, contents.as_bytes()).await
    }

    fn location(&self) -> String {
        self.root_dir.display().to_string()
    }
}

/// Write bytes atomically (write to temp, then rename), creating parent directories.
pub async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let tmp = path.with_extension("tmp");
    let mut file = tokio::fs::File::create(&tmp).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    drop(file);

    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

/// Write a value as pretty JSON to an arbitrary path.
pub async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    write_atomic(path, &bytes).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_bytes_returns_full_path() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        let path = storage.write_bytes("test.txt", b"hello").await.unwrap();
        assert_eq!(path, tmp.path().join("test.txt"));
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_write_document_creates_dirs_and_overwrites() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("content/games"));

        let path = storage
            .write_document("hades", "index.md", "first")
            .await
            .unwrap();
        storage
            .write_document("hades", "index.md", "second")
            .await
            .unwrap();

        assert_eq!(path, tmp.path().join("content/games/hades/index.md"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_write_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out/games.json");

        write_json(&path, &vec!["a", "b"]).await.unwrap();

        let loaded: Vec<String> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, vec!["a", "b"]);
    }
}
