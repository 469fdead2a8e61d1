//! Standard lock policies.
//!
//! - [`StdRwLock`] - `std::sync::RwLock`, the default
//! - [`StdMutex`] - `std::sync::Mutex`; shared access is exclusive as well
//! - [`ParkingLotRwLock`] - `parking_lot::RwLock` (requires the `parking_lot` feature)
//!
//! The std policies recover from poisoning. Every registry mutation is a single
//! `Vec` insert or remove, so a panic while holding the lock cannot leave the
//! registry half-updated.

use herald_core::LockPolicy;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Readers-writer policy backed by `std::sync::RwLock`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdRwLock;

impl LockPolicy for StdRwLock {
    type Lock<T: Send + Sync> = RwLock<T>;
    type Shared<'a, T: Send + Sync + 'a> = RwLockReadGuard<'a, T>;
    type Exclusive<'a, T: Send + Sync + 'a> = RwLockWriteGuard<'a, T>;

    fn new<T: Send + Sync>(value: T) -> Self::Lock<T> {
        RwLock::new(value)
    }

    fn shared<'a, T: Send + Sync + 'a>(lock: &'a Self::Lock<T>) -> Self::Shared<'a, T> {
        lock.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn exclusive<'a, T: Send + Sync + 'a>(lock: &'a Self::Lock<T>) -> Self::Exclusive<'a, T> {
        lock.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn into_inner<T: Send + Sync>(lock: Self::Lock<T>) -> T {
        lock.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Plain mutual exclusion backed by `std::sync::Mutex`.
///
/// Dispatches on different threads run one at a time under this policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdMutex;

impl LockPolicy for StdMutex {
    type Lock<T: Send + Sync> = Mutex<T>;
    type Shared<'a, T: Send + Sync + 'a> = MutexGuard<'a, T>;
    type Exclusive<'a, T: Send + Sync + 'a> = MutexGuard<'a, T>;

    fn new<T: Send + Sync>(value: T) -> Self::Lock<T> {
        Mutex::new(value)
    }

    fn shared<'a, T: Send + Sync + 'a>(lock: &'a Self::Lock<T>) -> Self::Shared<'a, T> {
        lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn exclusive<'a, T: Send + Sync + 'a>(lock: &'a Self::Lock<T>) -> Self::Exclusive<'a, T> {
        lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn into_inner<T: Send + Sync>(lock: Self::Lock<T>) -> T {
        lock.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Readers-writer policy backed by `parking_lot::RwLock`.
///
/// Uses a task-fair queue, so a waiting writer blocks new readers.
#[cfg(feature = "parking_lot")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ParkingLotRwLock;

#[cfg(feature = "parking_lot")]
impl LockPolicy for ParkingLotRwLock {
    type Lock<T: Send + Sync> = parking_lot::RwLock<T>;
    type Shared<'a, T: Send + Sync + 'a> = parking_lot::RwLockReadGuard<'a, T>;
    type Exclusive<'a, T: Send + Sync + 'a> = parking_lot::RwLockWriteGuard<'a, T>;

    fn new<T: Send + Sync>(value: T) -> Self::Lock<T> {
        parking_lot::RwLock::new(value)
    }

    fn shared<'a, T: Send + Sync + 'a>(lock: &'a Self::Lock<T>) -> Self::Shared<'a, T> {
        lock.read()
    }

    fn exclusive<'a, T: Send + Sync + 'a>(lock: &'a Self::Lock<T>) -> Self::Exclusive<'a, T> {
        lock.write()
    }

    fn into_inner<T: Send + Sync>(lock: Self::Lock<T>) -> T {
        lock.into_inner()
    }
}
