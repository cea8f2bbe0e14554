//! Key-value persistence port for the cart and wishlist containers.
//!
//! Containers persist whole JSON snapshots through this port and never see
//! where the bytes live. The storefront adapts its web session to it; tests
//! and tools use [`MemoryStorage`].

use std::collections::HashMap;

/// Synchronous string-keyed storage.
///
/// Operations are infallible by contract: an implementation whose backing
/// store can fail logs the failure and drops the write instead of surfacing
/// it here, so containers never have to unwind a half-applied mutation.
pub trait KeyValueStorage {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String);

    /// Delete `key`. Absent keys are a no-op.
    fn remove(&mut self, key: &str);
}

/// A mutable borrow of a store is itself a store, so containers can borrow
/// storage for a request instead of owning it.
impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) {
        (**self).set(key, value);
    }

    fn remove(&mut self, key: &str) {
        (**self).remove(key);
    }
}

/// HashMap-backed storage for tests and tools.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let mut storage = MemoryStorage::new();
        storage.set("cart", "[]".to_owned());
        assert_eq!(storage.get("cart"), Some("[]".to_owned()));
        assert_eq!(storage.get("wishlist"), None);
    }

    #[test]
    fn set_replaces_and_remove_deletes() {
        let mut storage = MemoryStorage::new();
        storage.set("k", "a".to_owned());
        storage.set("k", "b".to_owned());
        assert_eq!(storage.get("k"), Some("b".to_owned()));
        storage.remove("k");
        storage.remove("k");
        assert_eq!(storage.get("k"), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn mutable_borrow_is_usable_as_storage() {
        fn store_through(mut storage: impl KeyValueStorage) {
            storage.set("k", "v".to_owned());
        }

        let mut storage = MemoryStorage::new();
        store_through(&mut storage);
        assert_eq!(storage.get("k"), Some("v".to_owned()));
    }
}
