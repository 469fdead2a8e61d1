//! # herald-core
//!
//! Core traits and primitives for the Herald event dispatcher.
//!
//! This crate has minimal dependencies and is designed to be imported by code
//! that writes handlers or lock policies without needing the full
//! `herald-std` implementation.
//!
//! # Building Blocks
//!
//! ## Keys ([`EventKey`])
//!
//! The discriminator an event is dispatched under. Any `Eq + Hash` value works;
//! a small closed enum is the usual choice.
//!
//! ## Identifiers ([`HandlerId`], [`IdAllocator`])
//!
//! Every registration is answered with a unique, strictly increasing id that is
//! later used to unregister the handler.
//!
//! ## Handlers ([`Handler`], [`ErasedHandler`])
//!
//! A handler receives `&A` for some argument bundle `A` fixed at registration.
//! Handlers of different bundles are stored together behind [`ErasedHandler`],
//! each tagged with its [`Signature`] so that a dispatch with the wrong bundle
//! is reported instead of misread.
//!
//! ## Locking ([`LockPolicy`])
//!
//! The readers-writer discipline between dispatch and mutation, chosen at
//! compile time.
//!
//! # Error Types
//!
//! - [`HeraldError`] - Top-level error type
//! - [`DispatchError`] - Dispatch failures
//! - [`InvokeError`] - Single invocation failures

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod handler;
mod id;
mod key;
mod lock;
mod outcome;

// Re-exports
pub use error::{BoxError, DispatchError, HeraldError, InvokeError};
pub use handler::{ErasedHandler, Handler, Signature, TypedHandler, erase};
pub use id::{HandlerId, IdAllocator};
pub use key::EventKey;
pub use lock::LockPolicy;
pub use outcome::IntoHandlerResult;
