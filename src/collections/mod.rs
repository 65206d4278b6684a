//! Durable, capacity-bounded, order-preserving collections.
//!
//! Each collection owns its store key, capacity, and overflow policy as
//! explicit configuration. Every mutation persists the full collection
//! synchronously before returning; a write failure is logged and otherwise
//! ignored, leaving the in-memory state authoritative for the rest of the
//! session. Loading a corrupt or missing stored value yields the empty
//! default rather than an error.

use crate::store::KeyValueStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Store key for the favorites collection.
pub const FAVORITES_KEY: &str = "pokemon_favorites";
/// Store key for the search-history collection.
pub const SEARCH_HISTORY_KEY: &str = "pokemon_search_history";
/// Store key for the last-viewed collection.
pub const LAST_VIEWED_KEY: &str = "pokemon_last_viewed";

/// Maximum number of favorites.
pub const MAX_FAVORITES: usize = 6;
/// Maximum number of remembered search terms.
pub const SEARCH_HISTORY_CAPACITY: usize = 5;
/// Maximum number of remembered viewed records.
pub const LAST_VIEWED_CAPACITY: usize = 5;

/// What happens when an append would exceed capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Drop the oldest element before adding the new one (FIFO).
    Evict,
    /// Discard the new element; the collection is unchanged.
    Reject,
}

/// A durable, capacity-bounded, order-preserving collection.
///
/// Duplicate appends are skipped under both policies: an item already
/// anywhere in the collection is not re-added and not moved.
pub struct BoundedCollection<T> {
    store: Arc<dyn KeyValueStore>,
    key: String,
    capacity: usize,
    policy: OverflowPolicy,
    items: Vec<T>,
}

impl<T> BoundedCollection<T>
where
    T: Serialize + DeserializeOwned + PartialEq + Clone,
{
    /// Creates a collection bound to `key`, loading any previously
    /// persisted items.
    ///
    /// A corrupt or missing stored value loads as empty. Persisted items
    /// beyond `capacity` are dropped from the front.
    #[must_use]
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        capacity: usize,
        policy: OverflowPolicy,
    ) -> Self {
        let key = key.into();
        let mut items = Self::load(store.as_ref(), &key);
        if items.len() > capacity {
            items.drain(..items.len() - capacity);
        }
        Self {
            store,
            key,
            capacity,
            policy,
            items,
        }
    }

    /// Reads and decodes the persisted items, substituting empty on any
    /// failure.
    fn load(store: &dyn KeyValueStore, key: &str) -> Vec<T> {
        let raw = match store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to read collection, using default");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Corrupt stored collection, using default");
                Vec::new()
            }
        }
    }

    /// Writes the full collection back to the store.
    ///
    /// Write failures are logged and ignored; the in-memory items remain
    /// authoritative.
    fn persist(&self) {
        let encoded = match serde_json::to_string(&self.items) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to encode collection");
                return;
            }
        };
        if let Err(e) = self.store.set(&self.key, &encoded) {
            tracing::warn!(key = %self.key, error = %e, "Failed to persist collection");
        }
    }

    /// Appends `item`, honoring the overflow policy.
    ///
    /// Returns `true` if the collection changed. An item already present
    /// is skipped; at capacity, `Evict` drops the oldest element first
    /// while `Reject` discards the new item.
    pub fn append(&mut self, item: T) -> bool {
        if self.items.contains(&item) {
            return false;
        }
        if self.items.len() >= self.capacity {
            match self.policy {
                OverflowPolicy::Reject => return false,
                OverflowPolicy::Evict => {
                    self.items.remove(0);
                }
            }
        }
        self.items.push(item);
        self.persist();
        true
    }

    /// Removes `item` if present. Returns `true` if the collection changed.
    pub fn remove(&mut self, item: &T) -> bool {
        let Some(position) = self.items.iter().position(|existing| existing == item) else {
            return false;
        };
        self.items.remove(position);
        self.persist();
        true
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Whether `item` is a member.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether an append of a new item would currently be rejected.
    #[must_use]
    pub fn at_capacity(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// The items, oldest first.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }
}

impl BoundedCollection<u32> {
    /// The favorites collection: capacity 6, rejects at capacity.
    ///
    /// Rejecting rather than evicting distinguishes "I already chose my
    /// team of six" from history lists that roll forward.
    #[must_use]
    pub fn favorites(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(store, FAVORITES_KEY, MAX_FAVORITES, OverflowPolicy::Reject)
    }

    /// The last-viewed collection: capacity 5, FIFO eviction.
    #[must_use]
    pub fn last_viewed(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(
            store,
            LAST_VIEWED_KEY,
            LAST_VIEWED_CAPACITY,
            OverflowPolicy::Evict,
        )
    }
}

impl BoundedCollection<String> {
    /// The search-history collection: capacity 5, FIFO eviction.
    #[must_use]
    pub fn search_history(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(
            store,
            SEARCH_HISTORY_KEY,
            SEARCH_HISTORY_CAPACITY,
            OverflowPolicy::Evict,
        )
    }
}
