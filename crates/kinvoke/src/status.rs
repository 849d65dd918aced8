//! Stable status codes for [`InvokeError`] variants.
//!
//! [`InvokeStatus`] is a `repr(i32)` enum: `Ok` = 0, all errors are
//! negative. The CLI exits with the absolute value, so scripts driving the
//! smoke test can tell a missing library from a missing symbol. Malformed
//! command-line flags also exit with the `ConfigError` code.

use crate::error::InvokeError;

/// Status code for the outcome of an invocation.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvokeStatus {
    /// Success.
    Ok = 0,
    /// Library path missing or not loadable.
    LibraryNotFound = -1,
    /// Export absent from the library.
    SymbolNotFound = -2,
    /// Export resolved to a null address.
    NullSymbol = -3,
    /// Symbol name empty or containing NUL.
    InvalidSymbolName = -4,
    /// Buffer count differs from the declared signature.
    ArgumentCountMismatch = -5,
    /// Buffer length differs from the declared signature.
    BufferLengthMismatch = -6,
    /// Configuration validation error.
    ConfigError = -7,
    /// Library could not be unloaded.
    CloseFailed = -8,
}

impl InvokeStatus {
    /// Process exit code for this status (`0` for `Ok`).
    pub fn exit_code(self) -> u8 {
        (self as i32).unsigned_abs() as u8
    }
}

impl From<&InvokeError> for InvokeStatus {
    fn from(e: &InvokeError) -> Self {
        match e {
            InvokeError::LibraryNotFound { .. } => InvokeStatus::LibraryNotFound,
            InvokeError::SymbolNotFound { .. } => InvokeStatus::SymbolNotFound,
            InvokeError::NullSymbol { .. } => InvokeStatus::NullSymbol,
            InvokeError::InvalidSymbolName { .. } => InvokeStatus::InvalidSymbolName,
            InvokeError::ArgumentCountMismatch { .. } => InvokeStatus::ArgumentCountMismatch,
            InvokeError::BufferLengthMismatch { .. } => InvokeStatus::BufferLengthMismatch,
            InvokeError::Config(_) => InvokeStatus::ConfigError,
            InvokeError::CloseFailed { .. } => InvokeStatus::CloseFailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    // NullSymbol and CloseFailed are mapped from hand-built values only:
    // no portable library exports a null symbol or fails to unload.

    #[test]
    fn status_code_values_are_stable() {
        assert_eq!(InvokeStatus::Ok as i32, 0);
        assert_eq!(InvokeStatus::LibraryNotFound as i32, -1);
        assert_eq!(InvokeStatus::SymbolNotFound as i32, -2);
        assert_eq!(InvokeStatus::NullSymbol as i32, -3);
        assert_eq!(InvokeStatus::InvalidSymbolName as i32, -4);
        assert_eq!(InvokeStatus::ArgumentCountMismatch as i32, -5);
        assert_eq!(InvokeStatus::BufferLengthMismatch as i32, -6);
        assert_eq!(InvokeStatus::ConfigError as i32, -7);
        assert_eq!(InvokeStatus::CloseFailed as i32, -8);
    }

    #[test]
    fn exit_code_is_absolute_value() {
        assert_eq!(InvokeStatus::Ok.exit_code(), 0);
        assert_eq!(InvokeStatus::SymbolNotFound.exit_code(), 2);
        assert_eq!(InvokeStatus::CloseFailed.exit_code(), 8);
    }

    #[test]
    fn invoke_error_to_status() {
        assert_eq!(
            InvokeStatus::from(&InvokeError::NullSymbol { symbol: "k".into() }),
            InvokeStatus::NullSymbol
        );
        assert_eq!(
            InvokeStatus::from(&InvokeError::InvalidSymbolName {
                symbol: String::new(),
                reason: "empty",
            }),
            InvokeStatus::InvalidSymbolName
        );
        assert_eq!(
            InvokeStatus::from(&InvokeError::ArgumentCountMismatch {
                expected: 2,
                found: 1
            }),
            InvokeStatus::ArgumentCountMismatch
        );
        assert_eq!(
            InvokeStatus::from(&InvokeError::BufferLengthMismatch {
                index: 0,
                expected: 1,
                found: 4
            }),
            InvokeStatus::BufferLengthMismatch
        );
        assert_eq!(
            InvokeStatus::from(&InvokeError::Config(ConfigError::EmptyLibraryPath)),
            InvokeStatus::ConfigError
        );
    }
}
