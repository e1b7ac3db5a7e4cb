//! File-backed gateway implementation.
//!
//! One JSON file per key under a data directory (`products.json`,
//! `bills.json`, ...). Keys are the engine's fixed collection names, so no
//! escaping is needed in file names.

use async_trait::async_trait;
use directories::ProjectDirs;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;

use crate::error::StorageError;
use crate::gateway::StorageGateway;

/// Stores each snapshot as `<root>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    root: PathBuf,
}

impl JsonFileStorage {
    /// Creates a gateway rooted at the given directory, creating it if
    /// missing.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| StorageError::Io {
            key: root.display().to_string(),
            source,
        })?;
        Ok(JsonFileStorage { root })
    }

    /// Creates a gateway in the platform data directory.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.fastbills.pos/`
    /// - **Windows**: `%APPDATA%\fastbills\pos\data\`
    /// - **Linux**: `~/.local/share/fastbills-pos/`
    ///
    /// ## Development Override
    /// Set `FASTBILLS_DATA_DIR` to use a custom directory.
    pub fn in_user_data_dir() -> Result<Self, StorageError> {
        if let Ok(dir) = std::env::var("FASTBILLS_DATA_DIR") {
            return Self::new(dir);
        }
        let dirs = ProjectDirs::from("com", "fastbills", "pos").ok_or(StorageError::NoDataDir)?;
        Self::new(dirs.data_dir())
    }

    /// The directory snapshots are stored in.
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    fn temp_path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!(".{key}.json.tmp"))
    }
}

#[async_trait]
impl StorageGateway for JsonFileStorage {
    async fn save(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(&value).map_err(|source| StorageError::Serialization {
            key: key.to_string(),
            source,
        })?;

        // Write to a sibling temp file, then rename: a crash mid-write must
        // not leave a truncated snapshot behind.
        let temp = self.temp_path_for(key);
        fs::write(&temp, bytes)
            .await
            .map_err(|source| StorageError::Io {
                key: key.to_string(),
                source,
            })?;
        fs::rename(&temp, self.path_for(key))
            .await
            .map_err(|source| StorageError::Io {
                key: key.to_string(),
                source,
            })
    }

    async fn load(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let bytes = match fs::read(self.path_for(key)).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::Io {
                    key: key.to_string(),
                    source,
                })
            }
        };

        let value = serde_json::from_slice(&bytes).map_err(|source| StorageError::Serialization {
            key: key.to_string(),
            source,
        })?;
        Ok(Some(value))
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    async fn exists(&self, key: &str) -> bool {
        fs::try_exists(self.path_for(key)).await.unwrap_or(false)
    }

    async fn clear_all(&self) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            key: self.root.display().to_string(),
            source,
        };

        let mut entries = fs::read_dir(&self.root).await.map_err(io_err)?;
        while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(&path).await.map_err(io_err)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::load_or;
    use serde_json::json;

    #[tokio::test]
    async fn roundtrips_snapshots_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path()).unwrap();

        storage
            .save("products", json!([{"id": "1", "name": "Apples"}]))
            .await
            .unwrap();

        assert!(storage.exists("products").await);
        let loaded = storage.load("products").await.unwrap().unwrap();
        assert_eq!(loaded[0]["name"], "Apples");

        storage.remove("products").await.unwrap();
        assert_eq!(storage.load("products").await.unwrap(), None);
    }

    #[tokio::test]
    async fn missing_key_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path()).unwrap();
        assert_eq!(storage.load("bills").await.unwrap(), None);
        assert!(!storage.exists("bills").await);
    }

    #[tokio::test]
    async fn corrupt_file_degrades_to_default_via_load_or() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path()).unwrap();
        std::fs::write(dir.path().join("cart.json"), b"{ not json").unwrap();

        assert!(storage.load("cart").await.is_err());
        let cart: Vec<Value> = load_or(&storage, "cart", Vec::new()).await;
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn clear_all_removes_only_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path()).unwrap();
        storage.save("products", json!([])).await.unwrap();
        storage.save("bills", json!([])).await.unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"keep me").unwrap();

        storage.clear_all().await.unwrap();
        assert!(!storage.exists("products").await);
        assert!(!storage.exists("bills").await);
        assert!(dir.path().join("notes.txt").exists());
    }

    #[tokio::test]
    async fn save_replaces_prior_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path()).unwrap();
        storage.save("cart", json!([1, 2])).await.unwrap();
        storage.save("cart", json!([])).await.unwrap();
        assert_eq!(storage.load("cart").await.unwrap(), Some(json!([])));
    }
}
