//! File-backed store: one file per key inside a data directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{KeyValueStore, StorageError};

/// A [`KeyValueStore`] persisting each key as a file under a directory.
///
/// The directory is created lazily on the first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the stored files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        // Readers see either the old value or the new one, never a partial write
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        debug!(key, path = %path.display(), "persisted value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_a_new_handle() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("state"));
        store.set("cart", "[]").unwrap();

        let reopened = FileStore::new(temp.path().join("state"));
        assert_eq!(reopened.get("cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_missing_key_and_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("never-created"));
        assert_eq!(store.get("token").unwrap(), None);
        store.remove("token").unwrap();
    }

    #[test]
    fn test_remove() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = FileStore::new(temp.path());
        store.set("token", "t").unwrap();
        store.remove("token").unwrap();
        assert_eq!(store.get("token").unwrap(), None);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = FileStore::new(temp.path());
        assert!(matches!(
            store.set("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
