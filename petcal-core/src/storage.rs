//! Key-value persistence adapters.
//!
//! The store only needs `get` and `set` on string values. Adapters are
//! synchronous; the store calls them from tokio's blocking pool.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{PetcalError, PetcalResult};

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> PetcalResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> PetcalResult<()>;
}

/// Keys become file names, so keep them boring.
pub fn validate_key(key: &str) -> PetcalResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(PetcalError::InvalidKey(key.to_string()))
    }
}

/// One JSON file per key inside a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PetcalResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> PetcalResult<Option<String>> {
        let path = self.path_for(key)?;

        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PetcalError::Storage(format!(
                "Could not read {}: {e}",
                path.display()
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> PetcalResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        let temp = self.dir.join(format!("{key}.json.tmp"));

        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }
}

/// In-process store, handy for tests and embedding.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> PetcalResult<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| PetcalError::Storage("memory store lock poisoned".into()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PetcalResult<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| PetcalError::Storage("memory store lock poisoned".into()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
