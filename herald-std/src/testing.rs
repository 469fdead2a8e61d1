//! Testing utilities for Herald.
//!
//! This module provides handlers that make dispatch behavior easy to observe.
//!
//! # Features
//!
//! - [`RecordingHandler`]: Records every argument bundle it receives
//! - [`CountingHandler`]: Counts invocations atomically
//! - [`OrderRecorder`]: Records labels in invocation order across handlers
//! - [`FailingHandler`]: Fails every invocation

use herald_core::{BoxError, Handler};
use std::{
    marker::PhantomData,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
};
use thiserror::Error;

// ============================================================================
// Recording Handler
// ============================================================================

/// A handler that records all argument bundles it receives.
///
/// Clones share the same record, so keep one clone for assertions and
/// register the other.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingHandler::<String>::new();
/// dispatcher.register(Event::Message, 0, recorder.clone());
///
/// dispatcher.dispatch(&Event::Message, "hi".to_string())?;
/// assert_eq!(recorder.events(), vec!["hi".to_string()]);
/// ```
pub struct RecordingHandler<A> {
    events: Arc<Mutex<Vec<A>>>,
}

impl<A: Clone> RecordingHandler<A> {
    /// Create a new recording handler.
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a clone of the recorded argument bundles.
    pub fn events(&self) -> Vec<A> {
        self.lock().clone()
    }

    /// Get the number of recorded invocations.
    pub fn count(&self) -> usize {
        self.lock().len()
    }

    /// Clear all recorded argument bundles.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<A>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<A: Clone> Default for RecordingHandler<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for RecordingHandler<A> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
        }
    }
}

impl<A> Handler<A> for RecordingHandler<A>
where
    A: Clone + Send + 'static,
{
    fn call(&self, args: &A) -> Result<(), BoxError> {
        self.lock().push(args.clone());
        Ok(())
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingHandler::<u64>::new();
/// dispatcher.register(Event::Tick, 0, counter.clone());
///
/// dispatcher.dispatch(&Event::Tick, 1u64)?;
/// assert_eq!(counter.count(), 1);
/// ```
pub struct CountingHandler<A> {
    count: Arc<AtomicUsize>,
    _args: PhantomData<fn(&A)>,
}

impl<A> CountingHandler<A> {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            _args: PhantomData,
        }
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the count to zero.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl<A> Default for CountingHandler<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for CountingHandler<A> {
    fn clone(&self) -> Self {
        Self {
            count: self.count.clone(),
            _args: PhantomData,
        }
    }
}

impl<A: 'static> Handler<A> for CountingHandler<A> {
    fn call(&self, _args: &A) -> Result<(), BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Order Recorder
// ============================================================================

/// Records which handlers ran, in the order they ran.
///
/// Each call to [`handler`](Self::handler) produces a handler that appends its
/// label to the shared log.
///
/// # Example
///
/// ```rust,ignore
/// let order = OrderRecorder::new();
/// dispatcher.register(Event::A, 1, order.handler::<()>("low"));
/// dispatcher.register(Event::A, 9, order.handler::<()>("high"));
///
/// dispatcher.dispatch(&Event::A, ())?;
/// assert_eq!(order.labels(), vec!["high", "low"]);
/// ```
#[derive(Clone, Default)]
pub struct OrderRecorder {
    labels: Arc<Mutex<Vec<&'static str>>>,
}

impl OrderRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// A handler for argument bundle `A` that records `label` when invoked.
    pub fn handler<A: 'static>(&self, label: &'static str) -> impl Handler<A> + use<A> {
        let labels = self.labels.clone();
        move |_: &A| {
            labels
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(label);
        }
    }

    /// The recorded labels.
    pub fn labels(&self) -> Vec<&'static str> {
        self.labels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.labels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

// ============================================================================
// Failing Handler
// ============================================================================

/// The error returned by [`FailingHandler`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("injected failure: {0}")]
pub struct InjectedFailure(pub &'static str);

/// A handler that fails every invocation with [`InjectedFailure`].
///
/// Invocations are counted so tests can tell whether it ran at all.
pub struct FailingHandler<A> {
    message: &'static str,
    calls: Arc<AtomicUsize>,
    _args: PhantomData<fn(&A)>,
}

impl<A> FailingHandler<A> {
    /// Create a handler failing with `message`.
    pub fn new(message: &'static str) -> Self {
        Self {
            message,
            calls: Arc::new(AtomicUsize::new(0)),
            _args: PhantomData,
        }
    }

    /// How many times the handler was invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<A> Clone for FailingHandler<A> {
    fn clone(&self) -> Self {
        Self {
            message: self.message,
            calls: self.calls.clone(),
            _args: PhantomData,
        }
    }
}

impl<A: 'static> Handler<A> for FailingHandler<A> {
    fn call(&self, _args: &A) -> Result<(), BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Box::new(InjectedFailure(self.message)))
    }
}
