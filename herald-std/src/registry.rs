//! Keyed handler registry.
//!
//! The registry maps each event key to the handlers registered for it, kept in
//! dispatch order: priority descending, and registration order among equal
//! priorities. Both insertion and removal preserve that order.
//!
//! The registry itself is not synchronized; [`Dispatcher`](crate::Dispatcher)
//! wraps it in a lock.

use herald_core::{ErasedHandler, EventKey, HandlerId, Signature};
use std::{collections::HashMap, fmt};

/// A registered handler together with its id and priority.
pub struct HandlerEntry {
    id: HandlerId,
    priority: i32,
    handler: Box<dyn ErasedHandler>,
}

impl HandlerEntry {
    /// Create a new entry.
    pub fn new(id: HandlerId, priority: i32, handler: Box<dyn ErasedHandler>) -> Self {
        Self {
            id,
            priority,
            handler,
        }
    }

    /// The id returned at registration.
    pub fn id(&self) -> HandlerId {
        self.id
    }

    /// The priority; higher runs earlier.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// The argument bundle type of the handler.
    pub fn signature(&self) -> Signature {
        self.handler.signature()
    }

    /// Get the handler reference.
    pub fn handler(&self) -> &dyn ErasedHandler {
        &*self.handler
    }
}

impl fmt::Debug for HandlerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerEntry")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .field("signature", &self.signature())
            .finish_non_exhaustive()
    }
}

/// Ordered handler sequences per event key.
pub struct Registry<K> {
    handlers: HashMap<K, Vec<HandlerEntry>>,
}

impl<K: EventKey> Registry<K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Create an empty registry with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            handlers: HashMap::with_capacity(capacity),
        }
    }

    /// Insert an entry under `key`.
    ///
    /// The entry lands after every existing entry whose priority is greater
    /// than or equal to its own, which keeps the sequence sorted by descending
    /// priority with ties in insertion order.
    pub fn insert(&mut self, key: K, entry: HandlerEntry) {
        let seq = self.handlers.entry(key).or_default();
        let at = seq.partition_point(|e| e.priority >= entry.priority);
        seq.insert(at, entry);
    }

    /// Remove the entry with `id` from `key`'s sequence.
    ///
    /// Returns `false` if the key or the id is unknown. A sequence left empty
    /// is dropped.
    pub fn remove(&mut self, key: &K, id: HandlerId) -> bool {
        let Some(seq) = self.handlers.get_mut(key) else {
            return false;
        };
        let Some(pos) = seq.iter().position(|e| e.id == id) else {
            return false;
        };
        // Vec::remove shifts, keeping equal-priority entries in order.
        seq.remove(pos);
        if seq.is_empty() {
            self.handlers.remove(key);
        }
        true
    }

    /// Remove every entry under `key`, returning how many there were.
    pub fn clear(&mut self, key: &K) -> usize {
        self.handlers.remove(key).map_or(0, |seq| seq.len())
    }

    /// The entries for `key` in dispatch order; empty if none are registered.
    pub fn handlers(&self, key: &K) -> &[HandlerEntry] {
        self.handlers.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `key` has an entry with `id`.
    pub fn contains(&self, key: &K, id: HandlerId) -> bool {
        self.handlers(key).iter().any(|e| e.id == id)
    }

    /// Number of entries under `key`.
    pub fn len(&self, key: &K) -> usize {
        self.handlers(key).len()
    }

    /// Number of entries across all keys.
    pub fn total_len(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    /// Whether no key has any entry.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Keys that currently have at least one entry, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.handlers.keys()
    }
}

impl<K: EventKey> Default for Registry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: EventKey> fmt::Debug for Registry<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.handlers.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::{IdAllocator, erase};

    fn entry(ids: &IdAllocator, priority: i32) -> HandlerEntry {
        HandlerEntry::new(ids.next_id(), priority, erase(|_: &()| {}))
    }

    fn order(registry: &Registry<&'static str>, key: &'static str) -> Vec<(u64, i32)> {
        registry
            .handlers(&key)
            .iter()
            .map(|e| (e.id().get(), e.priority()))
            .collect()
    }

    #[test]
    fn test_insert_orders_by_priority_descending() {
        let ids = IdAllocator::new();
        let mut registry = Registry::new();

        registry.insert("k", entry(&ids, 5));
        registry.insert("k", entry(&ids, 10));
        registry.insert("k", entry(&ids, 7));

        assert_eq!(order(&registry, "k"), vec![(2, 10), (3, 7), (1, 5)]);
    }

    #[test]
    fn test_equal_priorities_keep_registration_order() {
        let ids = IdAllocator::new();
        let mut registry = Registry::new();

        registry.insert("k", entry(&ids, 0));
        registry.insert("k", entry(&ids, 3));
        registry.insert("k", entry(&ids, 0));
        registry.insert("k", entry(&ids, 3));
        registry.insert("k", entry(&ids, -1));
        registry.insert("k", entry(&ids, 0));

        assert_eq!(
            order(&registry, "k"),
            vec![(2, 3), (4, 3), (1, 0), (3, 0), (6, 0), (5, -1)]
        );
    }

    #[test]
    fn test_remove_preserves_order() {
        let ids = IdAllocator::new();
        let mut registry = Registry::new();
        for priority in [1, 1, 1, 1] {
            registry.insert("k", entry(&ids, priority));
        }

        assert!(registry.remove(&"k", HandlerId::new(2)));
        assert_eq!(order(&registry, "k"), vec![(1, 1), (3, 1), (4, 1)]);

        // Later equal-priority inserts still go to the back.
        registry.insert("k", entry(&ids, 1));
        assert_eq!(order(&registry, "k"), vec![(1, 1), (3, 1), (4, 1), (5, 1)]);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let ids = IdAllocator::new();
        let mut registry = Registry::new();
        registry.insert("a", entry(&ids, 0));

        assert!(!registry.remove(&"missing", HandlerId::new(1)));
        assert!(!registry.remove(&"a", HandlerId::new(99)));
        // Ids are scoped to their key.
        registry.insert("b", entry(&ids, 0));
        assert!(!registry.remove(&"a", HandlerId::new(2)));
        assert_eq!(registry.total_len(), 2);
    }

    #[test]
    fn test_empty_sequences_are_dropped() {
        let ids = IdAllocator::new();
        let mut registry = Registry::new();
        registry.insert("k", entry(&ids, 0));

        assert!(registry.remove(&"k", HandlerId::new(1)));
        assert!(registry.is_empty());
        assert!(registry.handlers(&"k").is_empty());
        assert_eq!(registry.keys().count(), 0);
    }

    #[test]
    fn test_clear_and_queries() {
        let ids = IdAllocator::new();
        let mut registry = Registry::new();
        registry.insert("a", entry(&ids, 0));
        registry.insert("a", entry(&ids, 1));
        registry.insert("b", entry(&ids, 0));

        assert_eq!(registry.len(&"a"), 2);
        assert!(registry.contains(&"a", HandlerId::new(2)));
        assert!(!registry.contains(&"b", HandlerId::new(2)));

        assert_eq!(registry.clear(&"a"), 2);
        assert_eq!(registry.clear(&"a"), 0);
        assert_eq!(registry.total_len(), 1);
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec![&"b"]);
    }
}
