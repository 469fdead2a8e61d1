//! Handler identifiers and their allocator.

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

/// Token returned by registration and used to unregister a handler later.
///
/// Ids are unique within one dispatcher and never reused, even after the
/// handler they named has been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerId(u64);

impl HandlerId {
    /// Wrap a raw id value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<HandlerId> for u64 {
    fn from(id: HandlerId) -> Self {
        id.0
    }
}

/// Issues strictly increasing [`HandlerId`]s, starting at 1.
///
/// The counter is independent of any registry lock; concurrent callers each
/// receive a distinct value.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    /// Create an allocator whose first id is 1.
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Allocate the next id.
    pub fn next_id(&self) -> HandlerId {
        // Uniqueness only needs the RMW to be atomic; ordering against the
        // registry comes from the registry lock.
        HandlerId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::HashSet, sync::Arc, thread};

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let ids = IdAllocator::new();
        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();

        assert_eq!(a.get(), 1);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_concurrent_allocation_is_unique() {
        let ids = Arc::new(IdAllocator::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                thread::spawn(move || (0..1000).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            let batch = handle.join().unwrap();
            // Each thread observes its own ids in increasing order.
            assert!(batch.windows(2).all(|w| w[0] < w[1]));
            for id in batch {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(seen.len(), 4000);
    }

    #[test]
    fn test_display() {
        assert_eq!(HandlerId::new(7).to_string(), "#7");
    }
}
