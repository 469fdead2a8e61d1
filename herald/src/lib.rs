//! # herald - Keyed, Prioritized Event Dispatch
//!
//! `herald` is an in-process event dispatcher. Handlers are registered under an
//! event key with a priority; dispatching a key runs its handlers synchronously
//! on the calling thread, highest priority first, with registration order
//! breaking ties.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use herald::prelude::*;
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EventKey)]
//! enum Event { Message }
//!
//! let dispatcher: Dispatcher<Event> = Dispatcher::new();
//! let id = dispatcher.register(Event::Message, 10, |msg: &String| println!("{msg}"));
//!
//! dispatcher.dispatch(&Event::Message, "hello".to_string())?;
//! assert!(dispatcher.unregister(&Event::Message, id));
//! ```
//!
//! ## Argument bundles
//!
//! Each handler declares the argument type it receives by reference. Several
//! arguments are passed as a tuple. Dispatching a key with a bundle of a
//! different type than a handler declared fails with
//! [`DispatchError::SignatureMismatch`] for that handler.
//!
//! ## Threads
//!
//! A [`Dispatcher`] is `Send + Sync`; share it through an `Arc`. Dispatches run
//! concurrently under the default [`StdRwLock`] policy. Handlers must not
//! register or unregister on the dispatcher that is running them.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use herald_core::{
    // Error types
    BoxError,
    DispatchError,
    // Handlers
    ErasedHandler,
    // Keys
    EventKey,
    Handler,
    // Ids
    HandlerId,
    HeraldError,
    IdAllocator,
    IntoHandlerResult,
    InvokeError,
    // Locking
    LockPolicy,
    Signature,
    TypedHandler,
    erase,
};

#[cfg(feature = "parking_lot")]
pub use herald_std::ParkingLotRwLock;
pub use herald_std::{
    Dispatcher, DispatcherBuilder, FailurePolicy, HandlerEntry, Registry, StdMutex, StdRwLock,
};

/// Lock policies.
pub mod lock {
    #![allow(clippy::wildcard_imports)]
    pub use herald_std::lock::*;
}

/// Standard handler implementations.
pub mod handlers {
    #![allow(clippy::wildcard_imports)]
    pub use herald_std::handlers::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use herald_std::testing::*;
}

/// Prelude module - common imports for Herald.
///
/// # Usage
///
/// ```rust,ignore
/// use herald::prelude::*;
/// ```
pub mod prelude {
    // With the `macros` feature this also brings in `#[derive(EventKey)]`.
    pub use crate::{
        BoxError, DispatchError, Dispatcher, EventKey, FailurePolicy, Handler, HandlerId,
    };
}

#[cfg(feature = "macros")]
pub use herald_macros::EventKey;
