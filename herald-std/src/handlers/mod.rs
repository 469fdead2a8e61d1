//! Standard handler implementations.

pub mod logging;

pub use logging::LoggingHandler;
