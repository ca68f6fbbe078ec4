//! Error types for the binding.
//!
//! Every wrapped call reports failure through [`CursesError`]: a static,
//! per-operation message plus the native detail that triggered it.

use crate::native::RawWindow;
use crate::trace;
use crate::types::OK;

/// Result type alias for curses operations.
pub type Result<T> = std::result::Result<T, CursesError>;

/// What the native library reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NativeFailure {
    /// A call returned something other than `OK`.
    #[error("native call returned {0}")]
    Code(i32),

    /// A window-creating call returned a null pointer.
    #[error("native call returned a null window")]
    NullWindow,

    /// `has_colors()` reported no color support.
    #[error("has_colors() is false")]
    NoColorSupport,
}

/// A failed curses operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CursesError {
    message: &'static str,
    #[source]
    native: NativeFailure,
}

impl CursesError {
    /// Create an error and record it in the trace log.
    pub fn new(message: &'static str, native: NativeFailure) -> Self {
        trace::trace_failure(message, &native);
        Self { message, native }
    }

    /// The per-operation message, e.g. `"Move failed"`.
    pub fn message(&self) -> &'static str {
        self.message
    }

    /// The native failure behind this error.
    pub fn native(&self) -> NativeFailure {
        self.native
    }
}

/// Conversion of native sentinel values into `Result`.
pub trait Sentinel: Sized {
    /// The value produced on success.
    type Output;

    /// Check the value, failing with `message` on the native sentinel.
    fn check(self, message: &'static str) -> Result<Self::Output>;
}

impl Sentinel for i32 {
    type Output = ();

    fn check(self, message: &'static str) -> Result<()> {
        if self == OK {
            Ok(())
        } else {
            Err(CursesError::new(message, NativeFailure::Code(self)))
        }
    }
}

/// Wrapper marking a raw window pointer for null checking.
pub struct Handle<W>(pub W);

impl<W: RawWindow> Sentinel for Handle<W> {
    type Output = W;

    fn check(self, message: &'static str) -> Result<W> {
        if self.0.is_null() {
            Err(CursesError::new(message, NativeFailure::NullWindow))
        } else {
            Ok(self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emulator::WinId;
    use crate::types::ERR;
    use std::error::Error as _;

    #[test]
    fn test_ok_code_passes() {
        assert!(OK.check("Move failed").is_ok());
    }

    #[test]
    fn test_err_code_keeps_native_detail() {
        let err = ERR.check("Move failed").unwrap_err();
        assert_eq!(err.message(), "Move failed");
        assert_eq!(err.native(), NativeFailure::Code(ERR));
        assert_eq!(err.to_string(), "Move failed");
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("native call returned -1".to_string())
        );
    }

    #[test]
    fn test_null_handle() {
        let err = Handle(WinId::null())
            .check("Failed to create window")
            .unwrap_err();
        assert_eq!(err.native(), NativeFailure::NullWindow);
    }
}
