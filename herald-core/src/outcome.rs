//! Handler return value conversion.

use crate::error::BoxError;

/// Trait for converting a handler's return value into success or failure.
///
/// # Default Implementations
///
/// - `()` → Success
/// - `Result<(), E>` → `Ok` is success, `Err` is a failure carrying `E`
///
/// Any `E` that converts into [`BoxError`] works, which covers every
/// `std::error::Error + Send + Sync`, `String`, `&str` and `BoxError` itself.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be returned from a handler",
    label = "handlers must return `()` or `Result<(), E>`",
    note = "Implement `IntoHandlerResult` or return `Result<(), E>` where `E: Into<BoxError>`."
)]
pub trait IntoHandlerResult {
    /// Convert the return value.
    fn into_handler_result(self) -> Result<(), BoxError>;
}

impl IntoHandlerResult for () {
    fn into_handler_result(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<E> IntoHandlerResult for Result<(), E>
where
    E: Into<BoxError>,
{
    fn into_handler_result(self) -> Result<(), BoxError> {
        self.map_err(Into::into)
    }
}
