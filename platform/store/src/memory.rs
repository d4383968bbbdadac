use std::collections::HashMap;

use crate::{KeyValueStore, StoreResult, validate_key};

/// Process-local slots. Used by tests and `BOTE_STORE=memory`.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        validate_key(key)?;
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        validate_key(key)?;
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        validate_key(key)?;
        self.slots.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_and_remove_forgets() {
        let mut store = MemoryStore::default();
        assert_eq!(store.get("boteGuardado").unwrap(), None);

        store.set("boteGuardado", "10").unwrap();
        store.set("boteGuardado", "25.5").unwrap();
        assert_eq!(store.get("boteGuardado").unwrap().as_deref(), Some("25.5"));
        assert_eq!(store.len(), 1);

        store.remove("boteGuardado").unwrap();
        store.remove("boteGuardado").unwrap();
        assert_eq!(store.get("boteGuardado").unwrap(), None);
        assert!(store.is_empty());
    }
}
