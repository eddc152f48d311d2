//! Persisted theme preference.
//!
//! [`KeyValueStore`] is the seam to the host's persistent storage. Backends:
//!
//! - [`MemoryStore`]: in-process, shareable between contexts
//! - [`FileStore`]: a JSON file under the user's config directory
//! - `WebStorage` (feature `web`): the browser's `localStorage`
//!
//! [`PreferenceStore`] wraps a backend and owns the failure policy: storage
//! errors are logged as warnings and swallowed, so the in-memory preference
//! stays authoritative.

mod file;
mod memory;

use tracing::{debug, warn};

use crate::error::StoreError;
use crate::theme::{ThemePreference, ThemeRegistry};

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage key the preference is written under.
pub const DEFAULT_STORAGE_KEY: &str = "mini-toolbox-theme";

/// A string key-value store scoped to the current user.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Reads and writes the active theme id under a fixed key.
///
/// # Example
///
/// ```rust
/// use toolbox_theme::{MemoryStore, PreferenceStore, ThemePreference, ThemeRegistry};
///
/// let backend = MemoryStore::new();
/// let mut store = PreferenceStore::new(backend.clone());
/// store.save(&ThemePreference::from("sunset"));
///
/// let fresh = PreferenceStore::new(backend);
/// assert_eq!(
///     fresh.load(ThemeRegistry::builtin()),
///     Some(ThemePreference::from("sunset"))
/// );
/// ```
#[derive(Debug)]
pub struct PreferenceStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    /// Uses [`DEFAULT_STORAGE_KEY`].
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Reads the stored preference.
    ///
    /// Returns `None` when nothing is stored, when the stored id is not in
    /// `registry`, or when the backend fails. Failures are logged, never
    /// returned.
    pub fn load(&self, registry: &ThemeRegistry) -> Option<ThemePreference> {
        match self.backend.get(&self.key) {
            Ok(Some(id)) if registry.contains(&id) => Some(ThemePreference::from_id(&id)),
            Ok(Some(id)) => {
                debug!(key = %self.key, id = %id, "ignoring stored theme with unknown id");
                None
            }
            Ok(None) => None,
            Err(err) => {
                warn!(key = %self.key, error = %err, "unable to load theme preference");
                None
            }
        }
    }

    /// Writes the preference.
    ///
    /// Returns whether the write reached storage. A failure is logged and
    /// otherwise ignored.
    pub fn save(&mut self, preference: &ThemePreference) -> bool {
        match self.backend.set(&self.key, preference.as_str()) {
            Ok(()) => true,
            Err(err) => {
                warn!(key = %self.key, error = %err, "unable to save theme preference");
                false
            }
        }
    }
}
