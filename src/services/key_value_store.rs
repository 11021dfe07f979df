use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read store file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write store file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("store file {path} is not a json object of strings: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to encode store contents: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String-keyed storage the catalog persists through.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
    /// Keys in ascending order.
    fn list(&self) -> Result<Vec<String>, StoreError>;
    /// Returns whether the key existed.
    fn delete(&mut self, key: &str) -> Result<bool, StoreError>;
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: BTreeMap<String, String>,
}

#[cfg(test)]
impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.entries.keys().cloned().collect())
    }

    fn delete(&mut self, key: &str) -> Result<bool, StoreError> {
        Ok(self.entries.remove(key).is_some())
    }
}

/// A single JSON object on disk, rewritten after every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file is an empty store; it is
    /// created on the first write.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(|source| StoreError::Read {
                path: path.clone(),
                source,
            })?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
                    path: path.clone(),
                    source,
                })?
            }
        } else {
            debug!(path = %path.display(), "store file does not exist yet");
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    fn flush(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), keys = self.entries.len(), "store flushed");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.entries.keys().cloned().collect())
    }

    fn delete(&mut self, key: &str) -> Result<bool, StoreError> {
        let existed = self.entries.remove(key).is_some();
        if existed {
            self.flush()?;
        }
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_fs::prelude::*;

    #[test]
    fn in_memory_store_supports_get_set_list_delete() {
        let mut store = InMemoryStore::new();
        store.set("b", "2".to_string()).unwrap();
        store.set("a", "1".to_string()).unwrap();

        assert_eq!(store.get("a").unwrap(), Some("1".to_string()));
        assert_eq!(store.get("missing").unwrap(), None);
        assert_eq!(store.list().unwrap(), vec!["a".to_string(), "b".to_string()]);
        assert!(store.delete("a").unwrap());
        assert!(!store.delete("a").unwrap());
        assert_eq!(store.list().unwrap(), vec!["b".to_string()]);
    }

    #[test]
    fn json_file_store_starts_empty_when_file_is_missing() {
        let temp = assert_fs::TempDir::new().unwrap();
        let store = JsonFileStore::open(temp.path().join("store.json")).unwrap();

        assert!(store.list().unwrap().is_empty());
        assert!(!temp.path().join("store.json").exists());
    }

    #[test]
    fn json_file_store_persists_across_reopen() {
        let temp = assert_fs::TempDir::new().unwrap();
        let path = temp.path().join("store.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("productsVersion", "v2".to_string()).unwrap();
        store.set("products", "[]".to_string()).unwrap();
        assert!(store.delete("products").unwrap());

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("productsVersion").unwrap(), Some("v2".to_string()));
        assert_eq!(reopened.get("products").unwrap(), None);
    }

    #[test]
    fn json_file_store_rejects_non_object_content() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("store.json");
        file.write_str("[1, 2, 3]").unwrap();

        let err = JsonFileStore::open(file.path()).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }
}
