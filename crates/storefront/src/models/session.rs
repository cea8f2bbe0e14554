//! Session-backed storage for the cart and wishlist containers.
//!
//! The core containers persist through a synchronous key-value port, while
//! tower-sessions is async. The stash bridges the two: it reads the handful
//! of container keys out of the session once, serves them synchronously for
//! the duration of the handler, and writes the dirty ones back at the end.
//!
//! A write-back failure loses at most one request's worth of mutations; the
//! response already reflects the in-memory state, so the visitor sees their
//! action succeed either way.

use std::collections::{HashMap, HashSet};

use tower_sessions::Session;

use marigold_core::storage::KeyValueStorage;
use marigold_core::{Cart, Wishlist, cart, wishlist};

/// Session keys the stash manages. Only container keys live here; anything
/// else in the session is none of the stash's business.
const STASH_KEYS: [&str; 2] = [cart::STORAGE_KEY, wishlist::STORAGE_KEY];

/// A request-scoped snapshot of the session's container entries.
#[derive(Debug, Default)]
pub struct SessionStash {
    entries: HashMap<String, String>,
    dirty: HashSet<String>,
}

impl SessionStash {
    /// Read the container keys out of the session.
    ///
    /// Unreadable entries are treated as absent; the containers' own corrupt
    /// payload handling takes over from there.
    pub async fn load(session: &Session) -> Self {
        let mut entries = HashMap::new();
        for key in STASH_KEYS {
            match session.get::<String>(key).await {
                Ok(Some(value)) => {
                    entries.insert(key.to_owned(), value);
                }
                Ok(None) => {}
                Err(error) => {
                    tracing::warn!(%error, key, "session entry unreadable, treating as absent");
                }
            }
        }
        Self {
            entries,
            dirty: HashSet::new(),
        }
    }

    /// Write dirty keys back to the session.
    ///
    /// Failures log and continue: the in-memory state already served the
    /// response, and the next successful mutation persists a full snapshot.
    pub async fn flush(self, session: &Session) {
        for key in self.dirty {
            let result = match self.entries.get(&key) {
                Some(value) => session.insert(&key, value.clone()).await,
                None => session.remove::<String>(&key).await.map(|_| ()),
            };
            if let Err(error) = result {
                tracing::warn!(%error, key, "session write-back failed, state kept in memory");
            }
        }
    }

    /// Whether any key has been mutated since loading.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }
}

impl KeyValueStorage for SessionStash {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
        self.dirty.insert(key.to_owned());
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.dirty.insert(key.to_owned());
        }
    }
}

/// Header badge counts rendered on every page.
#[derive(Debug, Clone, Copy, Default)]
pub struct NavBadges {
    pub cart_count: u32,
    pub wishlist_count: usize,
}

impl NavBadges {
    /// Derive badge counts from a loaded stash without mutating it.
    #[must_use]
    pub fn from_stash(stash: &mut SessionStash) -> Self {
        let cart_count = Cart::load(&mut *stash).count();
        let wishlist_count = Wishlist::load(&mut *stash).len();
        Self {
            cart_count,
            wishlist_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_marks_dirty_and_serves_reads() {
        let mut stash = SessionStash::default();
        assert!(!stash.is_dirty());

        stash.set("cart", "[]".to_owned());
        assert_eq!(stash.get("cart"), Some("[]".to_owned()));
        assert!(stash.is_dirty());
    }

    #[test]
    fn removing_an_absent_key_stays_clean() {
        let mut stash = SessionStash::default();
        stash.remove("wishlist");
        assert!(!stash.is_dirty());
    }

    #[test]
    fn containers_run_over_a_stash() {
        let mut stash = SessionStash::default();
        stash.entries
            .insert("wishlist".to_owned(), r#"["p1","p2"]"#.to_owned());

        let badges = NavBadges::from_stash(&mut stash);
        assert_eq!(badges.cart_count, 0);
        assert_eq!(badges.wishlist_count, 2);
        // Hydration only reads; the stash has nothing to write back.
        assert!(!stash.is_dirty());
    }
}
