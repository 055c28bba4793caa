//! Key-value store abstractions and implementations
//!
//! The engine persists exactly two logical keys (the issue collection and
//! the current session). The store is injected as a dependency so tests can
//! substitute the in-memory backend for the filesystem one.

use crate::config::Config;
use crate::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

/// Trait for key-value store backends
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under a key, or `None` if absent
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value under a key, overwriting any previous value
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Remove a key; removing an absent key is not an error
    async fn remove(&self, key: &str) -> Result<()>;

    /// Check whether a key is present
    async fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }
}

/// In-memory store implementation, used by tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: dashmap::DashMap<String, String>,
}

impl MemoryKeyValueStore {
    /// Create a new empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Filesystem store implementation, one JSON file per key
pub struct FileSystemKeyValueStore {
    base_dir: PathBuf,
}

impl FileSystemKeyValueStore {
    /// Create new store rooted at a custom directory
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Create new store with the default directory (./.civicreport)
    pub fn new_default() -> Result<Self> {
        let base_dir = std::env::current_dir()?.join(&Config::global().data_dir);
        Ok(Self::new(base_dir))
    }

    /// Ensure the data directory exists
    async fn ensure_directory_exists(&self) -> Result<()> {
        if !self.base_dir.exists() {
            tokio::fs::create_dir_all(&self.base_dir).await?;
        }
        Ok(())
    }

    /// Get the filepath for a key
    fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileSystemKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = tokio::fs::read_to_string(&path).await?;
        Ok(Some(value))
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.ensure_directory_exists().await?;
        let path = self.key_path(key);
        debug!("Writing store key {} to {}", key, path.display());
        tokio::fs::write(&path, value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            tokio::fs::remove_file(&path).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryKeyValueStore::new();

        assert_eq!(store.get("missing").await.unwrap(), None);

        store.set("key", "value".to_string()).await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), Some("value".to_string()));
        assert!(store.contains("key").await.unwrap());

        store.set("key", "replaced".to_string()).await.unwrap();
        assert_eq!(
            store.get("key").await.unwrap(),
            Some("replaced".to_string())
        );

        store.remove("key").await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_store_remove_absent_key() {
        let store = MemoryKeyValueStore::new();
        store.remove("never-set").await.unwrap();
    }

    #[tokio::test]
    async fn test_filesystem_store_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSystemKeyValueStore::new(temp_dir.path().join("data"));

        assert_eq!(store.get("missing").await.unwrap(), None);

        store.set("key", "{\"a\":1}".to_string()).await.unwrap();
        assert_eq!(
            store.get("key").await.unwrap(),
            Some("{\"a\":1}".to_string())
        );

        store.remove("key").await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_filesystem_store_creates_directory_on_write() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").join("data");
        let store = FileSystemKeyValueStore::new(base.clone());

        store.set("key", "value".to_string()).await.unwrap();
        assert!(base.join("key.json").exists());
    }
}
