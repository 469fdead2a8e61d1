//! Lock policy abstraction.
//!
//! A dispatcher is generic over a [`LockPolicy`], a family of locks able to
//! wrap any `T`. Shared access is taken for dispatch and read-only queries,
//! exclusive access for mutation. Access is released when the guard drops.
//!
//! Implementations must guarantee that at most one exclusive guard exists at a
//! time and that no shared guard coexists with it. Any number of shared guards
//! may coexist, though a policy is free to serialize them (a plain mutex is a
//! valid policy).

use std::ops::{Deref, DerefMut};

/// A family of readers-writer locks, selected at compile time.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a lock policy",
    label = "missing `LockPolicy` implementation",
    note = "Use one of the policies from `herald_std::lock` or implement `LockPolicy`."
)]
pub trait LockPolicy: Send + Sync + 'static {
    /// The lock type protecting a `T`.
    type Lock<T: Send + Sync>: Send + Sync;

    /// Guard held while shared access is active.
    type Shared<'a, T: Send + Sync + 'a>: Deref<Target = T>;

    /// Guard held while exclusive access is active.
    type Exclusive<'a, T: Send + Sync + 'a>: DerefMut<Target = T>;

    /// Create a lock around `value`.
    fn new<T: Send + Sync>(value: T) -> Self::Lock<T>;

    /// Block until shared access is acquired.
    fn shared<'a, T: Send + Sync + 'a>(lock: &'a Self::Lock<T>) -> Self::Shared<'a, T>;

    /// Block until exclusive access is acquired.
    fn exclusive<'a, T: Send + Sync + 'a>(lock: &'a Self::Lock<T>) -> Self::Exclusive<'a, T>;

    /// Consume the lock and return the protected value.
    fn into_inner<T: Send + Sync>(lock: Self::Lock<T>) -> T;
}
