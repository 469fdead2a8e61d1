//! Error types for Herald.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`HeraldError`] - Top-level error type for all Herald operations
//! - [`DispatchError`] - Errors raised while dispatching an event
//! - [`InvokeError`] - Errors from one type-erased handler invocation
//! - [`BoxError`] - The error type handlers fail with

use crate::id::HandlerId;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Herald operations.
#[derive(Error, Debug)]
pub enum HeraldError {
    /// An error occurred during event dispatch.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors that can occur during event dispatch.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The argument bundle supplied to `dispatch` is not the type the handler
    /// was registered with.
    #[error("handler {id} expects arguments of type `{expected}`, but dispatch supplied `{found}`")]
    SignatureMismatch {
        /// The handler that rejected the arguments.
        id: HandlerId,
        /// Argument type declared at registration.
        expected: &'static str,
        /// Argument type supplied at dispatch.
        found: &'static str,
    },

    /// A handler returned an error.
    #[error("handler {id} failed")]
    Handler {
        /// The handler that failed.
        id: HandlerId,
        /// The error it returned.
        #[source]
        source: BoxError,
    },

    /// Several handlers failed while failures were being isolated.
    ///
    /// Failures are listed in invocation order.
    #[error("{} handler(s) failed during dispatch", .0.len())]
    Collected(Vec<DispatchError>),
}

/// Errors returned by a single type-erased handler invocation.
///
/// These carry no handler id; the dispatcher attaches it when converting into
/// [`DispatchError`].
#[derive(Error, Debug)]
pub enum InvokeError {
    /// The argument bundle was not of the registered type.
    #[error("argument bundle is not of type `{expected}`")]
    Mismatch {
        /// Argument type declared at registration.
        expected: &'static str,
    },

    /// The handler ran and returned an error.
    #[error(transparent)]
    Failed(BoxError),
}

impl DispatchError {
    /// Attach a handler id to an invocation error.
    pub fn from_invoke(id: HandlerId, err: InvokeError, found: &'static str) -> Self {
        match err {
            InvokeError::Mismatch { expected } => DispatchError::SignatureMismatch {
                id,
                expected,
                found,
            },
            InvokeError::Failed(source) => DispatchError::Handler { id, source },
        }
    }

    /// The id of the handler responsible, if exactly one handler is.
    pub fn handler_id(&self) -> Option<HandlerId> {
        match self {
            DispatchError::SignatureMismatch { id, .. } | DispatchError::Handler { id, .. } => {
                Some(*id)
            }
            DispatchError::Collected(_) => None,
        }
    }

    /// Whether this error (or any collected error) is a signature mismatch.
    pub fn is_signature_mismatch(&self) -> bool {
        match self {
            DispatchError::SignatureMismatch { .. } => true,
            DispatchError::Handler { .. } => false,
            DispatchError::Collected(errors) => errors.iter().any(Self::is_signature_mismatch),
        }
    }
}

// Convenience conversions
impl From<BoxError> for HeraldError {
    fn from(err: BoxError) -> Self {
        HeraldError::Custom(err)
    }
}
