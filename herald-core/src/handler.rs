//! # Handlers and type erasure
//!
//! A [`Handler<A>`] is a callable that receives a shared reference to an
//! argument bundle `A`. Closures of the form `Fn(&A) -> R` are handlers as long
//! as `R` implements [`IntoHandlerResult`]. Several arguments travel as one
//! tuple bundle:
//!
//! ```rust,ignore
//! let handler = |(user, score): &(String, u32)| println!("{user}: {score}");
//! ```
//!
//! A dispatcher stores handlers of many different argument types side by side,
//! so each one is wrapped in a [`TypedHandler`] and kept behind the object-safe
//! [`ErasedHandler`] trait. The wrapper remembers the [`Signature`] it was
//! registered with; arguments are recovered with a checked downcast and a
//! mismatching bundle is reported as [`InvokeError::Mismatch`] instead of being
//! reinterpreted.

use crate::{
    error::{BoxError, InvokeError},
    outcome::IntoHandlerResult,
};
use std::{
    any::{Any, TypeId, type_name},
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
};

/// Runtime tag describing the argument bundle type of a handler.
///
/// Two signatures are equal exactly when their `TypeId`s are; the type name is
/// carried only for diagnostics.
#[derive(Clone, Copy)]
pub struct Signature {
    type_id: TypeId,
    type_name: &'static str,
}

impl Signature {
    /// The signature of argument bundle `A`.
    pub fn of<A: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<A>(),
            type_name: type_name::<A>(),
        }
    }

    /// The `TypeId` of the argument bundle.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The type name of the argument bundle.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for Signature {}

impl Hash for Signature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Signature").field(&self.type_name).finish()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

/// A callable invoked with a reference to argument bundle `A`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle arguments of type `{A}`",
    label = "missing `Handler<{A}>` implementation",
    note = "Closures must have the shape `Fn(&{A}) -> R` where `R: IntoHandlerResult`; annotate the closure parameter type."
)]
pub trait Handler<A>: Send + Sync + 'static {
    /// Execute the handler.
    fn call(&self, args: &A) -> Result<(), BoxError>;
}

// Blanket impl for closures
impl<F, A, R> Handler<A> for F
where
    F: Fn(&A) -> R + Send + Sync + 'static,
    R: IntoHandlerResult,
{
    fn call(&self, args: &A) -> Result<(), BoxError> {
        (self)(args).into_handler_result()
    }
}

/// Object-safe, type-erased handler.
///
/// This is the uniform interface a registry stores. Implementations must check
/// the dynamic type of `args` before using it.
pub trait ErasedHandler: Send + Sync + 'static {
    /// The argument bundle type this handler was registered with.
    fn signature(&self) -> Signature;

    /// Invoke the handler with a type-erased argument bundle.
    fn call_erased(&self, args: &dyn Any) -> Result<(), InvokeError>;
}

/// Wrapper implementing [`ErasedHandler`] for a typed [`Handler<A>`].
pub struct TypedHandler<A, H> {
    handler: H,
    // fn(&A) keeps the wrapper Send + Sync regardless of A.
    _args: PhantomData<fn(&A)>,
}

impl<A, H> TypedHandler<A, H> {
    /// Wrap a typed handler.
    pub const fn new(handler: H) -> Self {
        Self {
            handler,
            _args: PhantomData,
        }
    }
}

impl<A, H> ErasedHandler for TypedHandler<A, H>
where
    A: 'static,
    H: Handler<A>,
{
    fn signature(&self) -> Signature {
        Signature::of::<A>()
    }

    fn call_erased(&self, args: &dyn Any) -> Result<(), InvokeError> {
        let args = args.downcast_ref::<A>().ok_or(InvokeError::Mismatch {
            expected: type_name::<A>(),
        })?;
        self.handler.call(args).map_err(InvokeError::Failed)
    }
}

/// Box a typed handler behind the erased interface.
pub fn erase<A, H>(handler: H) -> Box<dyn ErasedHandler>
where
    A: 'static,
    H: Handler<A>,
{
    Box::new(TypedHandler::<A, H>::new(handler))
}
