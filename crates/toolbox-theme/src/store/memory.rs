//! In-process key-value store.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::KeyValueStore;
use crate::error::StoreError;

/// A key-value store held in memory.
///
/// Clones share the same map, so a context built over a clone sees what an
/// earlier context saved; this is how a "new session" is modelled without
/// touching disk.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: Option<Rc<RefCell<HashMap<String, String>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Some(Rc::default()),
        }
    }

    /// A store whose every access fails, like disabled browser storage.
    pub fn unavailable() -> Self {
        Self { entries: None }
    }

    fn entries(&self) -> Result<&Rc<RefCell<HashMap<String, String>>>, StoreError> {
        self.entries
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("storage is disabled".to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries()?.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries()?
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let mut a = MemoryStore::new();
        let b = a.clone();
        a.set("k", "v").unwrap();
        assert_eq!(b.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_overwrite() {
        let mut store = MemoryStore::new();
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_unavailable_fails_both_ways() {
        let mut store = MemoryStore::unavailable();
        assert!(matches!(store.get("k"), Err(StoreError::Unavailable(_))));
        assert!(matches!(store.set("k", "v"), Err(StoreError::Unavailable(_))));
    }

    #[test]
    fn test_default_is_empty_and_available() {
        assert_eq!(MemoryStore::default().get("k").unwrap(), None);
    }
}
