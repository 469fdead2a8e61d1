//! Event key marker trait.

use std::{fmt::Debug, hash::Hash};

/// A discriminator identifying a class of dispatchable events.
///
/// Keys are only ever used for lookup, so all that is required is equality,
/// hashing and thread safety. `Debug` is required so that keys can appear in
/// diagnostics.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// enum Input { KeyDown, KeyUp }
///
/// impl EventKey for Input {}
/// ```
///
/// With the `macros` feature of `herald`, `#[derive(EventKey)]` writes the
/// impl for you.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid EventKey",
    label = "must be `Eq + Hash + Debug + Send + Sync + 'static`",
    note = "Implement `EventKey` (or derive it) for the type used to key the dispatcher."
)]
pub trait EventKey: Eq + Hash + Debug + Send + Sync + 'static {}

// Common EventKey implementations
impl EventKey for () {}
impl EventKey for bool {}
impl EventKey for char {}
impl EventKey for u8 {}
impl EventKey for u16 {}
impl EventKey for u32 {}
impl EventKey for u64 {}
impl EventKey for usize {}
impl EventKey for i8 {}
impl EventKey for i16 {}
impl EventKey for i32 {}
impl EventKey for i64 {}
impl EventKey for isize {}
impl EventKey for String {}
impl EventKey for &'static str {}
impl EventKey for std::any::TypeId {}
impl<T: EventKey> EventKey for Option<T> {}
impl<A: EventKey, B: EventKey> EventKey for (A, B) {}
