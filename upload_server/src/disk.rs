//! Filesystem-backed storage for uploaded bytes.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use multifile_field::{FileStorage, Result};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Stores every upload flat under one root directory.
#[derive(Debug, Clone)]
pub struct DiskStorage {
    root: PathBuf,
}

impl DiskStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub async fn initialize(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).await?;
        }
        Ok(())
    }

    /// Uploaded names may carry path segments; only the base name is kept.
    fn sanitize(name: &str) -> String {
        Path::new(name)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string()
    }
}

#[async_trait]
impl FileStorage for DiskStorage {
    async fn save(&self, name: &str, data: &[u8]) -> Result<String> {
        let mut stored_name = Self::sanitize(name);
        if fs::try_exists(self.root.join(&stored_name)).await? {
            stored_name = format!("{}-{}", Uuid::new_v4(), stored_name);
        }

        let path = self.root.join(&stored_name);
        let mut file = fs::File::create(&path).await?;
        file.write_all(data).await?;
        file.sync_all().await?;

        tracing::debug!(name = %stored_name, bytes = data.len(), "stored upload");
        Ok(stored_name)
    }

    async fn delete(&self, stored_name: &str) -> Result<()> {
        let path = self.root.join(Self::sanitize(stored_name));
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(name = stored_name, "stored file already missing");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn test_storage() -> (DiskStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = DiskStorage::new(temp_dir.path());
        storage.initialize().await.unwrap();
        (storage, temp_dir)
    }

    #[tokio::test]
    async fn test_save_list_delete() {
        let (storage, _temp_dir) = test_storage().await;

        let stored = storage.save("notes.txt", b"hello").await.unwrap();
        assert_eq!(stored, "notes.txt");
        assert_eq!(storage.list().await.unwrap(), vec!["notes.txt"]);

        storage.delete(&stored).await.unwrap();
        assert!(storage.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_renames_on_collision() {
        let (storage, _temp_dir) = test_storage().await;

        let first = storage.save("notes.txt", b"one").await.unwrap();
        let second = storage.save("notes.txt", b"two").await.unwrap();

        assert_eq!(first, "notes.txt");
        assert_ne!(second, "notes.txt");
        assert!(second.ends_with("notes.txt"));
        assert_eq!(storage.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_save_strips_path_segments() {
        let (storage, temp_dir) = test_storage().await;

        let stored = storage.save("/long/path/uploaded_file.jpeg", b"x").await.unwrap();

        assert_eq!(stored, "uploaded_file.jpeg");
        assert!(temp_dir.path().join("uploaded_file.jpeg").exists());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_an_error() {
        let (storage, _temp_dir) = test_storage().await;

        assert!(storage.delete("never-stored.txt").await.is_ok());
    }
}
