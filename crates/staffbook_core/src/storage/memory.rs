//! In-process key-value backend.

use super::{KeyValueStore, StorageResult};
use std::cell::RefCell;
use std::collections::HashMap;

/// Map-backed store. Contents live only as long as the value.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryKeyValueStore;
    use crate::storage::KeyValueStore;

    #[test]
    fn set_replaces_and_remove_is_idempotent() {
        let store = MemoryKeyValueStore::new();
        assert_eq!(store.get("k").expect("get"), None);

        store.set("k", "one").expect("first set");
        store.set("k", "two").expect("second set");
        assert_eq!(store.get("k").expect("get").as_deref(), Some("two"));
        assert_eq!(store.len(), 1);

        store.remove("k").expect("remove");
        store.remove("k").expect("second remove");
        assert!(store.is_empty());
    }
}
