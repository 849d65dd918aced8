//! Dynamic kernel invoker.
//!
//! Loads a compiled shared library, resolves one exported kernel by name,
//! and calls it with sample `f32` buffers. Intended as a smoke test for
//! kernels emitted by an external compiler toolchain.
//!
//! The sequence is strictly linear: [`KernelLibrary::open`] →
//! [`KernelLibrary::resolve`] → [`Kernel::invoke`]. [`run()`] performs all
//! three from an [`InvokeConfig`].
//!
//! `unsafe` appears only at the native boundary: loading
//! ([`KernelLibrary::open`]), calling ([`Kernel::invoke`]), and [`run()`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod buffer;
pub mod config;
pub mod error;
pub mod kernel;
pub mod library;
pub mod run;
pub mod signature;
pub mod status;

pub use buffer::KernelBuffer;
pub use config::{ConfigError, InvokeConfig, DEFAULT_LIBRARY_PATH, DEFAULT_SYMBOL};
pub use error::InvokeError;
pub use kernel::Kernel;
pub use library::KernelLibrary;
pub use run::{run, InvocationReport};
pub use signature::{BufferSpec, KernelSignature, MAX_KERNEL_ARGS};
pub use status::InvokeStatus;
