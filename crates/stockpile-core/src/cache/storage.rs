use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A string key-value store, the persistence primitive behind `CacheStore`.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Overwrite the value under `key`. Implementations must never leave a
    /// partially written value behind.
    fn set(&mut self, key: &str, value: &str) -> Result<(), CacheError>;

    fn remove(&mut self, key: &str) -> Result<(), CacheError>;
}

/// Stores each key as a JSON file inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    cache_dir: PathBuf,
}

impl FileStorage {
    pub fn new(cache_dir: PathBuf) -> Result<Self, CacheError> {
        fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let path = self.cache_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CacheError> {
        let path = self.cache_path(key);

        // Write atomically via temp file
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &path)?;

        debug!(path = %path.display(), bytes = value.len(), "Cache file written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CacheError> {
        let path = self.cache_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-process storage; contents are lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CacheError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CacheError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_storage_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp_dir.path().join("cache")).unwrap();

        assert!(storage.get("products").unwrap().is_none());

        storage.set("products", "[]").unwrap();
        assert_eq!(storage.get("products").unwrap().as_deref(), Some("[]"));
        assert!(temp_dir.path().join("cache/products.json").exists());
        assert!(!temp_dir.path().join("cache/products.tmp").exists());
    }

    #[test]
    fn test_file_storage_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp_dir.path().to_path_buf()).unwrap();

        storage.set("products", "[1]").unwrap();
        storage.set("products", "[2]").unwrap();
        assert_eq!(storage.get("products").unwrap().as_deref(), Some("[2]"));
    }

    #[test]
    fn test_file_storage_remove() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp_dir.path().to_path_buf()).unwrap();

        storage.set("products", "[]").unwrap();
        storage.remove("products").unwrap();
        assert!(storage.get("products").unwrap().is_none());

        // Removing a missing key is not an error
        storage.remove("products").unwrap();
    }

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        assert!(storage.get("k").unwrap().is_none());
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        storage.remove("k").unwrap();
        assert!(storage.get("k").unwrap().is_none());
    }
}
