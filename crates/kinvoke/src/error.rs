//! Error types for loading, resolving, and invoking kernels.
//!
//! A crash inside the native call (a calling-convention mismatch surfacing
//! as SIGSEGV or similar) has no variant here: it cannot be observed as a
//! value and terminates the process.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use crate::config::ConfigError;

/// Errors from the load → resolve → invoke sequence.
#[derive(Debug)]
pub enum InvokeError {
    /// The library path does not exist, is unreadable, or is not a
    /// loadable library for this platform.
    LibraryNotFound {
        /// Path passed to the loader.
        path: PathBuf,
        /// Loader diagnostic.
        source: libloading::Error,
    },
    /// The requested export is absent from the library's symbol table.
    SymbolNotFound {
        /// Requested symbol name.
        symbol: String,
        /// Loader diagnostic.
        source: libloading::Error,
    },
    /// The export exists but resolved to a null address.
    NullSymbol {
        /// Requested symbol name.
        symbol: String,
    },
    /// The symbol name cannot be passed to the platform loader.
    InvalidSymbolName {
        /// Requested symbol name.
        symbol: String,
        /// Why the name was rejected.
        reason: &'static str,
    },
    /// The number of buffers differs from the declared signature.
    ArgumentCountMismatch {
        /// Parameters declared by the signature.
        expected: usize,
        /// Buffers supplied.
        found: usize,
    },
    /// A buffer's element count differs from its declared parameter.
    BufferLengthMismatch {
        /// Zero-based parameter position.
        index: usize,
        /// Declared element count.
        expected: usize,
        /// Supplied element count.
        found: usize,
    },
    /// The invocation configuration failed validation.
    Config(ConfigError),
    /// Unloading the library failed.
    CloseFailed {
        /// Path the library was loaded from.
        path: PathBuf,
        /// Loader diagnostic.
        source: libloading::Error,
    },
}

impl fmt::Display for InvokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LibraryNotFound { path, .. } => {
                write!(f, "cannot load library '{}'", path.display())
            }
            Self::SymbolNotFound { symbol, .. } => write!(f, "symbol '{symbol}' not found"),
            Self::NullSymbol { symbol } => write!(f, "symbol '{symbol}' resolved to null"),
            Self::InvalidSymbolName { symbol, reason } => {
                write!(f, "invalid symbol name {symbol:?}: {reason}")
            }
            Self::ArgumentCountMismatch { expected, found } => {
                write!(f, "kernel expects {expected} buffer(s), got {found}")
            }
            Self::BufferLengthMismatch {
                index,
                expected,
                found,
            } => write!(
                f,
                "argument {index}: kernel expects {expected} element(s), got {found}"
            ),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::CloseFailed { path, .. } => {
                write!(f, "cannot unload library '{}'", path.display())
            }
        }
    }
}

impl Error for InvokeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::LibraryNotFound { source, .. }
            | Self::SymbolNotFound { source, .. }
            | Self::CloseFailed { source, .. } => Some(source),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for InvokeError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
