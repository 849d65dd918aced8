//! Invocation configuration, validation, and error types.
//!
//! [`InvokeConfig`] describes one smoke-test run: which library to load,
//! which symbol to call, and the shape of the sample buffers. Defaults
//! reproduce the usual manual check of a freshly linked `tmp_obj.so`.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use crate::library::symbol_name_error;
use crate::signature::{KernelSignature, MAX_KERNEL_ARGS};

/// Library loaded when no path is given.
pub const DEFAULT_LIBRARY_PATH: &str = "/tmp/tmp_obj.so";

/// Kernel symbol called when no name is given.
pub const DEFAULT_SYMBOL: &str = "add_kernel_0d1d2c";

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`InvokeConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `library_path` is empty.
    EmptyLibraryPath,
    /// `symbol` is empty or contains a NUL byte.
    InvalidSymbolName {
        /// Why the name was rejected.
        reason: &'static str,
    },
    /// More buffer parameters than a kernel may declare.
    TooManyArguments {
        /// Number of parameters configured.
        count: usize,
        /// Upper bound ([`MAX_KERNEL_ARGS`]).
        max: usize,
    },
    /// A buffer parameter has zero elements.
    ZeroLengthBuffer {
        /// Zero-based parameter position.
        index: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLibraryPath => write!(f, "library path is empty"),
            Self::InvalidSymbolName { reason } => write!(f, "invalid symbol name: {reason}"),
            Self::TooManyArguments { count, max } => {
                write!(f, "{count} kernel arguments configured, at most {max} supported")
            }
            Self::ZeroLengthBuffer { index } => {
                write!(f, "argument {index} has zero elements")
            }
        }
    }
}

impl Error for ConfigError {}

// ── InvokeConfig ───────────────────────────────────────────────────

/// Inputs for one [`run`](crate::run::run).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvokeConfig {
    /// Shared library to load. Default: [`DEFAULT_LIBRARY_PATH`].
    pub library_path: PathBuf,
    /// Exported kernel to call. Default: [`DEFAULT_SYMBOL`].
    pub symbol: String,
    /// Element count of each `f32*` parameter, in call order.
    /// Default: `[1, 2]`.
    pub arg_lens: Vec<usize>,
    /// Seed for the sample buffers. `None` draws a fresh seed, which is
    /// reported so the run can be repeated.
    pub seed: Option<u64>,
}

impl Default for InvokeConfig {
    fn default() -> Self {
        Self {
            library_path: PathBuf::from(DEFAULT_LIBRARY_PATH),
            symbol: DEFAULT_SYMBOL.to_string(),
            arg_lens: vec![1, 2],
            seed: None,
        }
    }
}

impl InvokeConfig {
    /// Check structural invariants. Does not touch the filesystem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.library_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyLibraryPath);
        }
        if let Some(reason) = symbol_name_error(&self.symbol) {
            return Err(ConfigError::InvalidSymbolName { reason });
        }
        if self.arg_lens.len() > MAX_KERNEL_ARGS {
            return Err(ConfigError::TooManyArguments {
                count: self.arg_lens.len(),
                max: MAX_KERNEL_ARGS,
            });
        }
        if let Some(index) = self.arg_lens.iter().position(|&n| n == 0) {
            return Err(ConfigError::ZeroLengthBuffer { index });
        }
        Ok(())
    }

    /// Validate, then build the declared kernel signature.
    pub fn signature(&self) -> Result<KernelSignature, ConfigError> {
        self.validate()?;
        KernelSignature::from_lens(&self.arg_lens).ok_or(ConfigError::TooManyArguments {
            count: self.arg_lens.len(),
            max: MAX_KERNEL_ARGS,
        })
    }
}
