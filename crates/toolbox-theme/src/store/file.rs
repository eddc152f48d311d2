//! JSON file key-value store.
//!
//! The file holds a flat JSON object of string values:
//!
//! ```json
//! { "mini-toolbox-theme": "forest" }
//! ```
//!
//! The file is re-read on every access, so separate processes sharing it see
//! each other's writes. Writes replace the file atomically; a corrupted file
//! is overwritten by the next write.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::warn;

use super::KeyValueStore;
use crate::error::StoreError;

/// Directory under the user config dir holding the preference file.
pub const CONFIG_DIR_NAME: &str = "mini-toolbox";

/// File name of the preference file.
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// A key-value store persisted as a JSON object on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/mini-toolbox/preferences.json`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when the platform has no config
    /// directory.
    pub fn in_config_dir() -> Result<Self, StoreError> {
        Ok(Self::new(default_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new())
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&contents).map_err(|source| StoreError::Corrupted {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(io_err)?;
        let contents = serde_json::to_string_pretty(entries).map_err(|source| {
            StoreError::Corrupted {
                path: self.path.clone(),
                source,
            }
        })?;

        // Write beside the target and rename, so readers never see a partial file.
        let mut staged = NamedTempFile::new_in(parent).map_err(io_err)?;
        staged.write_all(contents.as_bytes()).map_err(io_err)?;
        staged.persist(&self.path).map_err(|err| io_err(err.error))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(err @ StoreError::Corrupted { .. }) => {
                warn!(error = %err, "overwriting corrupted preference file");
                BTreeMap::new()
            }
            Err(err) => return Err(err),
        };
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }
}

/// Returns the default preference file path.
pub fn default_path() -> Result<PathBuf, StoreError> {
    let base = dirs_next::config_dir()
        .ok_or_else(|| StoreError::Unavailable("no user config directory".to_string()))?;
    Ok(base.join(CONFIG_DIR_NAME).join(PREFERENCES_FILE_NAME))
}
