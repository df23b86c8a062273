//! Storage backends for workspace blobs.
//!
//! The workspace persists each collection (projects, users, activity log,
//! current session) as one named JSON blob. [`BlobStore`] abstracts where the
//! blobs live: [`JsonFileStore`] writes one pretty-printed file per key under
//! a data directory, [`MemoryStore`] keeps them in a map for tests.

use crate::error::{DataCollabError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Blob keys used by the workspace.
pub mod keys {
    pub const PROJECTS: &str = "projects";
    pub const USERS: &str = "users";
    pub const CURRENT_USER: &str = "current_user";
    pub const ACTIVITY_LOG: &str = "activity_log";
}

/// Get/put/remove of named JSON blobs.
pub trait BlobStore {
    /// Read a blob, `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a blob; removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// One JSON file per key under a workspace directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl BlobStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DataCollabError::Storage(format!(
                "Failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let path = self.blob_path(key);
        std::fs::write(&path, value).map_err(|e| {
            DataCollabError::Storage(format!("Failed to write {}: {e}", path.display()))
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.blob_path(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DataCollabError::Storage(format!(
                "Failed to remove {}: {e}",
                path.display()
            ))),
        }
    }
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|_| DataCollabError::Storage("Memory store lock poisoned".to_owned()))?;
        Ok(blobs.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|_| DataCollabError::Storage("Memory store lock poisoned".to_owned()))?;
        blobs.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|_| DataCollabError::Storage("Memory store lock poisoned".to_owned()))?;
        blobs.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn exercise(store: &dyn BlobStore) {
        assert!(store.get("missing").unwrap().is_none());

        store.put("projects", "[]").unwrap();
        assert_eq!(store.get("projects").unwrap().as_deref(), Some("[]"));

        store.put("projects", r#"[{"x":1}]"#).unwrap();
        assert_eq!(
            store.get("projects").unwrap().as_deref(),
            Some(r#"[{"x":1}]"#)
        );

        store.remove("projects").unwrap();
        assert!(store.get("projects").unwrap().is_none());

        // Removing twice is fine.
        store.remove("projects").unwrap();
    }

    #[test]
    fn test_memory_store() {
        exercise(&MemoryStore::default());
    }

    #[test]
    fn test_json_file_store() -> Result<()> {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("workspace"))?;
        exercise(&store);

        store.put("users", "[]")?;
        assert!(store.root().join("users.json").exists());
        Ok(())
    }
}
