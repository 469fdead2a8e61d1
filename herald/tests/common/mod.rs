#![allow(dead_code)]

use herald::{Dispatcher, EventKey, LockPolicy};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Test Keys
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    Input,
    Message,
    Tick,
}

impl EventKey for Event {}

// ============================================================================
// Test Handlers
// ============================================================================

/// Registers a handler that appends `label` to `log` each time it runs.
pub fn register_labelled<A: 'static, L: LockPolicy>(
    dispatcher: &Dispatcher<Event, L>,
    key: Event,
    priority: i32,
    label: &'static str,
    log: &Arc<Mutex<Vec<&'static str>>>,
) -> herald::HandlerId {
    let log = log.clone();
    dispatcher.register(key, priority, move |_: &A| {
        log.lock().unwrap().push(label);
    })
}

/// Registers a handler counting its invocations.
pub fn register_counter<A: 'static, L: LockPolicy>(
    dispatcher: &Dispatcher<Event, L>,
    key: Event,
    priority: i32,
) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let sink = count.clone();
    dispatcher.register(key, priority, move |_: &A| {
        sink.fetch_add(1, Ordering::SeqCst);
    });
    count
}

pub fn new_log() -> Arc<Mutex<Vec<&'static str>>> {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn take(log: &Arc<Mutex<Vec<&'static str>>>) -> Vec<&'static str> {
    std::mem::take(&mut *log.lock().unwrap())
}
