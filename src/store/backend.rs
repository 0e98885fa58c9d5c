//! Storage backends: where collection JSON actually lives.

use super::StoreError;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::debug;

/// Raw persistence for named collections.
///
/// A collection is stored as one JSON document (an array of records).
/// Repositories sit on top and handle typing; backends only move text.
pub trait Backend: Send + Sync {
    /// Read a collection, `None` if it has never been written.
    fn read(&self, collection: &str) -> Result<Option<String>, StoreError>;

    /// Replace a collection's contents.
    fn write(&self, collection: &str, contents: &str) -> Result<(), StoreError>;
}

/// Collection names become file names; reject anything that could escape
/// the data directory.
fn validate_collection(collection: &str) -> Result<(), StoreError> {
    if collection.is_empty()
        || collection.contains("..")
        || collection.contains('/')
        || collection.contains('\\')
        || collection.contains('\0')
    {
        return Err(StoreError::InvalidCollection(collection.to_string()));
    }
    Ok(())
}

/// File-per-collection backend rooted at a data directory.
#[derive(Debug)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Open (creating if needed) a data directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            collection: root.display().to_string(),
            source,
        })?;
        Ok(Self { root })
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{collection}.json"))
    }
}

impl Backend for FileBackend {
    fn read(&self, collection: &str) -> Result<Option<String>, StoreError> {
        validate_collection(collection)?;
        match fs::read_to_string(self.collection_path(collection)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                collection: collection.to_string(),
                source,
            }),
        }
    }

    fn write(&self, collection: &str, contents: &str) -> Result<(), StoreError> {
        validate_collection(collection)?;
        let final_path = self.collection_path(collection);
        // Write to a temp file in the same directory, then rename over the
        // target. Rename is atomic on the platforms we support, so readers
        // never observe a half-written collection.
        let temp_path = self.root.join(format!(
            ".{collection}.tmp.{}",
            std::process::id()
        ));
        let io_err = |source| StoreError::Io {
            collection: collection.to_string(),
            source,
        };
        fs::write(&temp_path, contents).map_err(io_err)?;
        fs::rename(&temp_path, &final_path).map_err(io_err)?;
        debug!(collection = collection, bytes = contents.len(), "Collection written");
        Ok(())
    }
}

/// In-memory backend for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    collections: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Backend for MemoryBackend {
    fn read(&self, collection: &str) -> Result<Option<String>, StoreError> {
        validate_collection(collection)?;
        let map = self.collections.read().unwrap_or_else(|e| e.into_inner());
        Ok(map.get(collection).cloned())
    }

    fn write(&self, collection: &str, contents: &str) -> Result<(), StoreError> {
        validate_collection(collection)?;
        let mut map = self.collections.write().unwrap_or_else(|e| e.into_inner());
        map.insert(collection.to_string(), contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_backend_round_trips() {
        let temp = tempdir().unwrap();
        let backend = FileBackend::open(temp.path()).unwrap();
        assert!(backend.read("contexts").unwrap().is_none());
        backend.write("contexts", "[]").unwrap();
        assert_eq!(backend.read("contexts").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn file_backend_rejects_traversal_names() {
        let temp = tempdir().unwrap();
        let backend = FileBackend::open(temp.path()).unwrap();
        assert!(backend.read("../etc/passwd").is_err());
        assert!(backend.write("a/b", "[]").is_err());
        assert!(backend.write("", "[]").is_err());
    }

    #[test]
    fn file_backend_overwrite_replaces_contents() {
        let temp = tempdir().unwrap();
        let backend = FileBackend::open(temp.path()).unwrap();
        backend.write("risks", "[1]").unwrap();
        backend.write("risks", "[1,2]").unwrap();
        assert_eq!(backend.read("risks").unwrap().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn memory_backend_round_trips() {
        let backend = MemoryBackend::new();
        assert!(backend.read("contexts").unwrap().is_none());
        backend.write("contexts", "[]").unwrap();
        assert_eq!(backend.read("contexts").unwrap().as_deref(), Some("[]"));
    }
}
