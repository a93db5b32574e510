use std::{collections::HashMap, sync::RwLock};

use crate::StoreError;

/// Key holding the wallet balance as decimal text.
pub const BALANCE_KEY: &str = "balance";
/// Key holding the serialized expense list.
pub const EXPENSES_KEY: &str = "expenses";

/// Abstraction over the text key-value store the wallet is persisted to.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Writes several keys in order. Stores that can commit them together
    /// override this so a failure leaves none of them written.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

/// Volatile store kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            entries: RwLock::new(map),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let guard = self
            .entries
            .read()
            .map_err(|_| StoreError::Storage("memory store lock poisoned".into()))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut guard = self
            .entries
            .write()
            .map_err(|_| StoreError::Storage("memory store lock poisoned".into()))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        let mut guard = self
            .entries
            .write()
            .map_err(|_| StoreError::Storage("memory store lock poisoned".into()))?;
        for (key, value) in entries {
            guard.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_values() {
        let store = MemoryStore::new();
        assert_eq!(store.get(BALANCE_KEY).unwrap(), None);
        store.set(BALANCE_KEY, "5000").unwrap();
        store.set(BALANCE_KEY, "4800").unwrap();
        assert_eq!(store.get(BALANCE_KEY).unwrap().as_deref(), Some("4800"));
    }

    /// Fails every write to one key, passing the rest through.
    struct FailingKey {
        inner: MemoryStore,
        key: &'static str,
    }

    impl KeyValueStore for FailingKey {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if key == self.key {
                return Err(StoreError::Storage(format!("{key} is read-only")));
            }
            self.inner.set(key, value)
        }
    }

    #[test]
    fn default_set_many_stops_at_first_failure() {
        let store = FailingKey {
            inner: MemoryStore::new(),
            key: "second",
        };
        let result = store.set_many(&[("first", "1"), ("second", "2"), ("third", "3")]);
        assert!(result.is_err());
        assert_eq!(store.get("first").unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("third").unwrap(), None);
    }

    #[test]
    fn memory_store_writes_batches() {
        let store = MemoryStore::new();
        store
            .set_many(&[(EXPENSES_KEY, "[]"), (BALANCE_KEY, "5000")])
            .unwrap();
        assert_eq!(store.get(EXPENSES_KEY).unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get(BALANCE_KEY).unwrap().as_deref(), Some("5000"));
    }
}
