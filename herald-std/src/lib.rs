//! # herald-std
//!
//! Standard implementations for the Herald event dispatcher.
//!
//! This crate provides:
//! - **Dispatching**: [`Dispatcher`], configured through [`DispatcherBuilder`]
//! - **Storage**: [`Registry`], the priority-ordered handler sequences per key
//! - **Lock policies**: [`StdRwLock`], [`StdMutex`] and, with the
//!   `parking_lot` feature, `ParkingLotRwLock`
//! - **Standard handlers**: Logging
//! - **Testing utilities**: recording, counting and failing handlers

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use herald_core;

// Modules
pub mod dispatcher;
pub mod handlers;
pub mod lock;
pub mod registry;
pub mod testing;

pub use dispatcher::{Dispatcher, DispatcherBuilder, FailurePolicy};
#[cfg(feature = "parking_lot")]
pub use lock::ParkingLotRwLock;
pub use lock::{StdMutex, StdRwLock};
pub use registry::{HandlerEntry, Registry};
