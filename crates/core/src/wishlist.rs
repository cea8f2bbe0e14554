//! Wishlist container.
//!
//! Stores product ids only, in the order they were added. Pages resolve the
//! ids against the catalog at render time, so ids for products that have
//! since been deleted cost nothing and simply render as absent.

use crate::storage::KeyValueStorage;
use crate::types::ProductId;

/// Storage key the wishlist persists under.
pub const STORAGE_KEY: &str = "wishlist";

/// A wishlist bound to a storage backend.
///
/// Same storage discipline as the cart: hydrate first, persist after every
/// mutation, never write before hydration has run.
#[derive(Debug)]
pub struct Wishlist<S> {
    storage: S,
    ids: Vec<ProductId>,
    hydrated: bool,
}

impl<S: KeyValueStorage> Wishlist<S> {
    /// Create a wishlist without reading storage.
    pub const fn new(storage: S) -> Self {
        Self {
            storage,
            ids: Vec::new(),
            hydrated: false,
        }
    }

    /// Create and hydrate in one step.
    pub fn load(storage: S) -> Self {
        let mut wishlist = Self::new(storage);
        wishlist.hydrate();
        wishlist
    }

    /// Read the persisted ids into memory, replacing the current ones.
    /// Unreadable payloads log a warning and leave the wishlist empty.
    pub fn hydrate(&mut self) {
        if let Some(raw) = self.storage.get(STORAGE_KEY) {
            match serde_json::from_str(&raw) {
                Ok(ids) => self.ids = ids,
                Err(error) => {
                    tracing::warn!(%error, "discarding unreadable wishlist payload");
                    self.ids = Vec::new();
                }
            }
        }
        self.hydrated = true;
    }

    /// Add an id. Already-present ids keep their position.
    pub fn add(&mut self, id: ProductId) {
        if self.ids.contains(&id) {
            return;
        }
        self.ids.push(id);
        self.persist();
    }

    /// Remove an id. Absent ids are a no-op.
    pub fn remove(&mut self, id: &ProductId) {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        if self.ids.len() != before {
            self.persist();
        }
    }

    /// Flip membership. Returns whether the id ended up present.
    pub fn toggle(&mut self, id: ProductId) -> bool {
        if self.contains(&id) {
            self.remove(&id);
            false
        } else {
            self.add(id);
            true
        }
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.ids.contains(id)
    }

    /// Ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Drop every id.
    pub fn clear(&mut self) {
        if !self.ids.is_empty() {
            self.ids.clear();
            self.persist();
        }
    }

    fn persist(&mut self) {
        if !self.hydrated {
            return;
        }
        match serde_json::to_string(&self.ids) {
            Ok(json) => self.storage.set(STORAGE_KEY, json),
            Err(error) => {
                tracing::warn!(%error, "wishlist snapshot did not serialize, keeping previous one");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn add_is_idempotent_and_keeps_order() {
        let mut wishlist = Wishlist::load(MemoryStorage::new());
        wishlist.add(ProductId::new("p2"));
        wishlist.add(ProductId::new("p1"));
        wishlist.add(ProductId::new("p2"));

        let ids: Vec<&str> = wishlist.ids().iter().map(ProductId::as_str).collect();
        assert_eq!(ids, vec!["p2", "p1"]);
        assert_eq!(wishlist.len(), 2);
    }

    #[test]
    fn remove_is_a_no_op_when_absent() {
        let mut wishlist = Wishlist::load(MemoryStorage::new());
        wishlist.add(ProductId::new("p1"));
        wishlist.remove(&ProductId::new("p9"));
        assert_eq!(wishlist.len(), 1);
        wishlist.remove(&ProductId::new("p1"));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn toggle_reports_resulting_membership() {
        let mut wishlist = Wishlist::load(MemoryStorage::new());
        assert!(wishlist.toggle(ProductId::new("p1")));
        assert!(wishlist.contains(&ProductId::new("p1")));
        assert!(!wishlist.toggle(ProductId::new("p1")));
        assert!(!wishlist.contains(&ProductId::new("p1")));
    }

    #[test]
    fn ids_survive_a_rebuild_in_order() {
        let mut storage = MemoryStorage::new();
        let mut wishlist = Wishlist::load(&mut storage);
        wishlist.add(ProductId::new("p3"));
        wishlist.add(ProductId::new("p1"));
        drop(wishlist);

        let rebuilt = Wishlist::load(&mut storage);
        let ids: Vec<&str> = rebuilt.ids().iter().map(ProductId::as_str).collect();
        assert_eq!(ids, vec!["p3", "p1"]);
    }

    #[test]
    fn corrupt_payload_hydrates_empty_then_recovers() {
        let mut storage = MemoryStorage::new();
        storage.set(STORAGE_KEY, "[[[".to_owned());

        let mut wishlist = Wishlist::load(&mut storage);
        assert!(wishlist.is_empty());
        wishlist.add(ProductId::new("p1"));
        drop(wishlist);

        assert!(Wishlist::load(&mut storage).contains(&ProductId::new("p1")));
    }

    #[test]
    fn mutations_before_hydration_do_not_persist() {
        let mut storage = MemoryStorage::new();
        storage.set(STORAGE_KEY, "[\"p1\"]".to_owned());

        let mut cold = Wishlist::new(&mut storage);
        cold.add(ProductId::new("p2"));
        drop(cold);
        assert_eq!(storage.get(STORAGE_KEY), Some("[\"p1\"]".to_owned()));
    }
}
