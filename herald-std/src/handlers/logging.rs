//! Logging handler for dispatch observation.

use herald_core::{BoxError, Handler};
use std::{fmt::Debug, marker::PhantomData};

/// A handler that logs every argument bundle it receives.
///
/// Register it at a high priority to trace what a key is dispatched with
/// before other handlers run. Output goes through `tracing` at debug level
/// when the `tracing` feature is enabled; otherwise the handler does nothing.
///
/// # Example
///
/// ```rust,ignore
/// dispatcher.register(Event::Save, i32::MAX, LoggingHandler::<String>::named("save"));
/// ```
pub struct LoggingHandler<A> {
    name: &'static str,
    _args: PhantomData<fn(&A)>,
}

impl<A> LoggingHandler<A> {
    /// Create a new `LoggingHandler` with a default name.
    pub fn new() -> Self {
        Self::named("event")
    }

    /// Create a new `LoggingHandler` with a custom name.
    ///
    /// The name identifies the handler in log messages.
    pub fn named(name: &'static str) -> Self {
        Self {
            name,
            _args: PhantomData,
        }
    }

    /// The name used in log messages.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<A> Default for LoggingHandler<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Handler<A> for LoggingHandler<A>
where
    A: Debug + 'static,
{
    fn call(&self, args: &A) -> Result<(), BoxError> {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(name = %self.name, ?args, "handling event");
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = (self.name, args);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Saved {
        path: String,
    }

    #[test]
    fn test_logging_handler_always_succeeds() {
        let handler = LoggingHandler::<Saved>::named("save");
        assert_eq!(handler.name(), "save");

        let args = Saved {
            path: "notes.txt".to_string(),
        };
        assert!(handler.call(&args).is_ok());
        assert_eq!(args.path, "notes.txt");
    }

    #[test]
    fn test_default_name() {
        assert_eq!(LoggingHandler::<()>::default().name(), "event");
    }
}
