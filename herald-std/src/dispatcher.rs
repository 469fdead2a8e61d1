//! The keyed event dispatcher.
//!
//! [`Dispatcher`] ties the pieces together: an [`IdAllocator`] for handler
//! ids, a [`Registry`] holding the ordered handler sequences, and a
//! [`LockPolicy`] guarding the registry.
//!
//! # Example
//!
//! ```rust,ignore
//! let dispatcher: Dispatcher<Event> = Dispatcher::new();
//!
//! let id = dispatcher.register(Event::Message, 10, |msg: &String| {
//!     println!("got {msg}");
//! });
//! dispatcher.dispatch(&Event::Message, String::from("hello"))?;
//! dispatcher.unregister(&Event::Message, id);
//! ```

use crate::{
    lock::StdRwLock,
    registry::{HandlerEntry, Registry},
};
use herald_core::{
    DispatchError, EventKey, Handler, HandlerId, IdAllocator, LockPolicy, Signature, erase,
};
use std::{any::Any, fmt, marker::PhantomData};

/// What a dispatch does when a handler fails.
///
/// A failure is either an error returned by the handler or a
/// [`DispatchError::SignatureMismatch`]. Panics are never caught under either
/// policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failure and return it; later handlers are skipped.
    #[default]
    Propagate,
    /// Run every handler and return all failures as
    /// [`DispatchError::Collected`], in invocation order.
    Isolate,
}

/// A thread-safe dispatcher mapping event keys to prioritized handlers.
///
/// Handlers run synchronously on the dispatching thread, highest priority
/// first; handlers with equal priority run in registration order.
///
/// # Locking
///
/// `register`, `unregister` and `clear` take exclusive access; `dispatch` and
/// the query methods take shared access. A dispatch holds shared access for
/// its entire run over the handler sequence, so it observes every mutation
/// that completed before it started and none that started after.
///
/// # Reentrancy
///
/// A handler must not call `register`, `unregister` or `clear` on the
/// dispatcher that is invoking it: the exclusive lock cannot be acquired while
/// the dispatch holds shared access, and the call deadlocks.
pub struct Dispatcher<K: EventKey, L: LockPolicy = StdRwLock> {
    registry: L::Lock<Registry<K>>,
    ids: IdAllocator,
    failure_policy: FailurePolicy,
    name: &'static str,
}

impl<K: EventKey> Dispatcher<K, StdRwLock> {
    /// Create an empty dispatcher with the default lock policy.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start configuring a dispatcher.
    pub fn builder() -> DispatcherBuilder<K, StdRwLock> {
        DispatcherBuilder::new()
    }
}

impl<K: EventKey, L: LockPolicy> Dispatcher<K, L> {
    fn from_builder(builder: DispatcherBuilder<K, L>) -> Self {
        Self {
            registry: L::new(Registry::with_capacity(builder.capacity)),
            ids: IdAllocator::new(),
            failure_policy: builder.failure_policy,
            name: builder.name,
        }
    }

    /// Register `handler` under `key` with the given priority.
    ///
    /// Higher priorities run earlier. The returned id is unique for this
    /// dispatcher and greater than every id returned before it.
    pub fn register<A, H>(&self, key: K, priority: i32, handler: H) -> HandlerId
    where
        A: 'static,
        H: Handler<A>,
    {
        let handler = erase::<A, H>(handler);
        let mut registry = L::exclusive(&self.registry);
        // Allocated under the lock so id order matches insertion order.
        let id = self.ids.next_id();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            dispatcher = self.name,
            ?key,
            %id,
            priority,
            signature = %handler.signature(),
            "registered handler"
        );

        registry.insert(key, HandlerEntry::new(id, priority, handler));
        id
    }

    /// Register `handler` under `key` with priority 0.
    pub fn register_default<A, H>(&self, key: K, handler: H) -> HandlerId
    where
        A: 'static,
        H: Handler<A>,
    {
        self.register(key, 0, handler)
    }

    /// Remove the handler `id` from `key`.
    ///
    /// Returns `false` if no such handler is registered under `key`.
    pub fn unregister(&self, key: &K, id: HandlerId) -> bool {
        let removed = L::exclusive(&self.registry).remove(key, id);

        #[cfg(feature = "tracing")]
        tracing::debug!(dispatcher = self.name, ?key, %id, removed, "unregister");

        removed
    }

    /// Remove every handler registered under `key`, returning how many.
    pub fn clear(&self, key: &K) -> usize {
        let removed = L::exclusive(&self.registry).clear(key);

        #[cfg(feature = "tracing")]
        tracing::debug!(dispatcher = self.name, ?key, removed, "cleared handlers");

        removed
    }

    /// Dispatch `args` to every handler registered under `key`.
    ///
    /// The arguments are bound once and each handler receives `&args`. A key
    /// with no handlers is not an error.
    pub fn dispatch<A: 'static>(&self, key: &K, args: A) -> Result<(), DispatchError> {
        self.dispatch_ref(key, &args)
    }

    /// Like [`dispatch`](Self::dispatch), but borrows the arguments.
    pub fn dispatch_ref<A: 'static>(&self, key: &K, args: &A) -> Result<(), DispatchError> {
        let supplied = Signature::of::<A>();
        let registry = L::shared(&self.registry);
        let handlers = registry.handlers(key);
        if handlers.is_empty() {
            return Ok(());
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            dispatcher = self.name,
            ?key,
            handlers = handlers.len(),
            signature = %supplied,
            "dispatching"
        );

        let mut failures = Vec::new();
        for entry in handlers {
            let Err(err) = invoke(entry, args, supplied) else {
                continue;
            };

            #[cfg(feature = "tracing")]
            tracing::warn!(dispatcher = self.name, ?key, error = %err, "handler failed");

            match self.failure_policy {
                FailurePolicy::Propagate => return Err(err),
                FailurePolicy::Isolate => failures.push(err),
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(DispatchError::Collected(failures))
        }
    }

    /// Number of handlers registered under `key`.
    pub fn handler_count(&self, key: &K) -> usize {
        L::shared(&self.registry).len(key)
    }

    /// Number of handlers across all keys.
    pub fn total_handlers(&self) -> usize {
        L::shared(&self.registry).total_len()
    }

    /// Whether no handler is registered under any key.
    pub fn is_empty(&self) -> bool {
        L::shared(&self.registry).is_empty()
    }

    /// Whether handler `id` is registered under `key`.
    pub fn contains(&self, key: &K, id: HandlerId) -> bool {
        L::shared(&self.registry).contains(key, id)
    }

    /// The label given at construction, used in log output.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The configured failure policy.
    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Consume the dispatcher and return its registry.
    pub fn into_registry(self) -> Registry<K> {
        L::into_inner(self.registry)
    }
}

fn invoke<A: 'static>(
    entry: &HandlerEntry,
    args: &A,
    supplied: Signature,
) -> Result<(), DispatchError> {
    let expected = entry.signature();
    if expected != supplied {
        return Err(DispatchError::SignatureMismatch {
            id: entry.id(),
            expected: expected.type_name(),
            found: supplied.type_name(),
        });
    }
    entry
        .handler()
        .call_erased(args as &dyn Any)
        .map_err(|err| DispatchError::from_invoke(entry.id(), err, supplied.type_name()))
}

impl<K: EventKey> Default for Dispatcher<K, StdRwLock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: EventKey, L: LockPolicy> fmt::Debug for Dispatcher<K, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("name", &self.name)
            .field("failure_policy", &self.failure_policy)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// DispatcherBuilder
// ============================================================================

/// Builder for constructing a [`Dispatcher`].
///
/// # Example
/// ```ignore
/// let dispatcher = Dispatcher::<Event>::builder()
///     .name("input")
///     .failure_policy(FailurePolicy::Isolate)
///     .lock_policy::<StdMutex>()
///     .build();
/// ```
pub struct DispatcherBuilder<K, L = StdRwLock> {
    failure_policy: FailurePolicy,
    name: &'static str,
    capacity: usize,
    _marker: PhantomData<fn() -> (K, L)>,
}

impl<K: EventKey, L: LockPolicy> DispatcherBuilder<K, L> {
    /// Create a builder with the default settings.
    pub fn new() -> Self {
        Self {
            failure_policy: FailurePolicy::default(),
            name: "herald",
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Set the failure policy.
    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Set the label used in log output.
    pub fn name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Pre-size the key map for `capacity` distinct keys.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Switch to another lock policy.
    pub fn lock_policy<P: LockPolicy>(self) -> DispatcherBuilder<K, P> {
        DispatcherBuilder {
            failure_policy: self.failure_policy,
            name: self.name,
            capacity: self.capacity,
            _marker: PhantomData,
        }
    }

    /// Build the dispatcher.
    pub fn build(self) -> Dispatcher<K, L> {
        Dispatcher::from_builder(self)
    }
}

impl<K: EventKey, L: LockPolicy> Default for DispatcherBuilder<K, L> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lock::StdMutex;
    use herald_core::BoxError;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Key {
        A,
        B,
    }

    impl EventKey for Key {}

    fn recorder() -> (Arc<Mutex<Vec<&'static str>>>, impl Fn(&'static str) + Clone) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        (log, move |label| sink.lock().unwrap().push(label))
    }

    #[test]
    fn test_priority_order() {
        let dispatcher = Dispatcher::<Key>::new();
        let (log, push) = recorder();

        let p = push.clone();
        dispatcher.register(Key::A, 5, move |_: &i32| p("h1"));
        let p = push.clone();
        dispatcher.register(Key::A, 10, move |_: &i32| p("h2"));
        let p = push.clone();
        dispatcher.register(Key::A, 7, move |_: &i32| p("h3"));

        dispatcher.dispatch(&Key::A, 1).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["h2", "h3", "h1"]);
    }

    #[test]
    fn test_dispatch_unknown_key_is_noop() {
        let dispatcher = Dispatcher::<Key>::new();
        dispatcher.register_default(Key::A, |_: &i32| -> Result<(), BoxError> {
            Err("must not run".into())
        });

        assert!(dispatcher.dispatch(&Key::B, 1).is_ok());
    }

    #[test]
    fn test_signature_mismatch_is_reported() {
        let dispatcher = Dispatcher::<Key>::new();
        let id = dispatcher.register_default(Key::A, |_: &String| {});

        let err = dispatcher.dispatch(&Key::A, 5u32).unwrap_err();
        match err {
            DispatchError::SignatureMismatch {
                id: failed,
                expected,
                found,
            } => {
                assert_eq!(failed, id);
                assert_eq!(expected, "alloc::string::String");
                assert_eq!(found, "u32");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_propagate_stops_at_first_failure() {
        let dispatcher = Dispatcher::<Key>::new();
        let (log, push) = recorder();

        let p = push.clone();
        dispatcher.register(Key::A, 3, move |_: &()| p("first"));
        let failing = dispatcher.register(Key::A, 2, |_: &()| -> Result<(), BoxError> {
            Err("boom".into())
        });
        let p = push.clone();
        dispatcher.register(Key::A, 1, move |_: &()| p("never"));

        let err = dispatcher.dispatch(&Key::A, ()).unwrap_err();
        assert_eq!(err.handler_id(), Some(failing));
        assert_eq!(*log.lock().unwrap(), vec!["first"]);
    }

    #[test]
    fn test_isolate_runs_everything() {
        let dispatcher = Dispatcher::<Key>::builder()
            .failure_policy(FailurePolicy::Isolate)
            .build();
        let (log, push) = recorder();

        let bad = dispatcher.register(Key::A, 3, |_: &()| -> Result<(), BoxError> {
            Err("boom".into())
        });
        let p = push.clone();
        dispatcher.register(Key::A, 2, move |_: &()| p("still runs"));
        let wrong = dispatcher.register(Key::A, 1, |_: &u8| {});

        match dispatcher.dispatch(&Key::A, ()).unwrap_err() {
            DispatchError::Collected(errors) => {
                let ids: Vec<_> = errors.iter().filter_map(|e| e.handler_id()).collect();
                assert_eq!(ids, vec![bad, wrong]);
                assert!(errors[1].is_signature_mismatch());
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(*log.lock().unwrap(), vec!["still runs"]);

        // No failures, no error.
        assert!(dispatcher.dispatch(&Key::B, ()).is_ok());
    }

    #[test]
    fn test_builder_settings() {
        let dispatcher = Dispatcher::<Key>::builder()
            .name("input")
            .with_capacity(4)
            .lock_policy::<StdMutex>()
            .build();

        assert_eq!(dispatcher.name(), "input");
        assert_eq!(dispatcher.failure_policy(), FailurePolicy::Propagate);
        assert!(dispatcher.is_empty());

        let id = dispatcher.register_default(Key::B, |_: &()| {});
        assert!(dispatcher.contains(&Key::B, id));
        assert_eq!(dispatcher.handler_count(&Key::B), 1);
        assert_eq!(dispatcher.total_handlers(), 1);
        assert_eq!(dispatcher.clear(&Key::B), 1);
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn test_into_registry_keeps_order() {
        let dispatcher = Dispatcher::<Key>::builder()
            .lock_policy::<StdMutex>()
            .build();
        let low = dispatcher.register(Key::A, 1, |_: &()| {});
        let high = dispatcher.register(Key::A, 9, |_: &()| {});
        dispatcher.register(Key::B, 0, |_: &u8| {});

        let registry = dispatcher.into_registry();
        let mut keys: Vec<_> = registry.keys().copied().collect();
        keys.sort_by_key(|k| *k as u8);
        assert_eq!(keys, vec![Key::A, Key::B]);
        assert_eq!(registry.total_len(), 3);

        let ids: Vec<_> = registry.handlers(&Key::A).iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![high, low]);
    }
}
