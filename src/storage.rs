//! Key-value persistence backends.
//!
//! Stores only need three primitives (`get`/`set`/`remove` on string keys), mirroring the
//! persistent key-value storage a browser profile provides. [`FileStorage`] keeps one file
//! per key under a directory; [`MemoryStorage`] is an in-memory table, handy for tests.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config;
use crate::error::PersistenceError;

/// A durable string-keyed, string-valued store
pub trait KeyValueStorage {
    /// Returns the value stored under `key`, or `None` if the key is absent
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    /// Stores `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
    /// Removes `key`. Removing an absent key is not an error
    fn remove(&mut self, key: &str) -> Result<(), PersistenceError>;
}

/// A storage backend that keeps each key in its own file under a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// The default storage directory, derived from the platform config dir and
    /// the configured [`app_name`](crate::config::app_name)
    pub fn default_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(config::app_name())
    }

    /// Open a storage directory, creating it if needed
    pub fn new(dir: &Path) -> Result<Self, PersistenceError> {
        fs::create_dir_all(dir).map_err(|source| PersistenceError::Write {
            key: dir.to_string_lossy().into_owned(),
            source,
        })?;
        Ok(Self { dir: PathBuf::from(dir) })
    }

    /// Open the default storage directory (see [`FileStorage::default_dir`])
    pub fn in_default_location() -> Result<Self, PersistenceError> {
        Self::new(&Self::default_dir())
    }

    /// The file a given key is stored in
    fn file_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_filename::sanitize(key)))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(self.file_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistenceError::Read { key: key.to_string(), source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        fs::write(self.file_for(key), value).map_err(|source| PersistenceError::Write {
            key: key.to_string(),
            source,
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        match fs::remove_file(self.file_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(PersistenceError::Remove { key: key.to_string(), source }),
        }
    }
}

/// An in-memory storage backend
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemoryStorage {
    data: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.data.remove(key);
        Ok(())
    }
}
