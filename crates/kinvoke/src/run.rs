//! One-shot load → resolve → invoke sequence.

use std::path::PathBuf;

use log::info;
use rand::prelude::*;

use crate::buffer::KernelBuffer;
use crate::config::InvokeConfig;
use crate::error::InvokeError;
use crate::kernel::Kernel;
use crate::library::KernelLibrary;

/// What a completed [`run`] observed.
#[derive(Clone, Debug, PartialEq)]
pub struct InvocationReport {
    /// Library the kernel was loaded from.
    pub library_path: PathBuf,
    /// Kernel symbol that was called.
    pub symbol: String,
    /// Entry address of the kernel while the library was loaded.
    pub address: usize,
    /// Seed the sample buffers were drawn with.
    pub seed: u64,
    /// Buffers as passed to the kernel.
    pub inputs: Vec<KernelBuffer>,
    /// Buffers after the kernel returned.
    pub outputs: Vec<KernelBuffer>,
}

/// Load `config.library_path`, resolve `config.symbol`, and call it once
/// with standard-normal sample buffers shaped by `config.arg_lens`.
///
/// `on_resolved` sees the kernel after lookup and before the native call.
/// The library is unloaded before returning, on success and on error.
///
/// # Errors
///
/// The first failing step's [`InvokeError`]. Nothing is retried.
///
/// # Safety
///
/// As for [`KernelLibrary::open`] and [`Kernel::invoke`]: the library must
/// be trusted and its export must match the configured signature.
#[allow(unsafe_code)]
pub unsafe fn run(
    config: &InvokeConfig,
    on_resolved: impl FnOnce(&Kernel<'_>),
) -> Result<InvocationReport, InvokeError> {
    let signature = config.signature()?;
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());

    // SAFETY: forwarded to the caller.
    let library = unsafe { KernelLibrary::open(&config.library_path) }?;
    let (address, inputs, outputs) = {
        let kernel = library.resolve(&config.symbol, signature)?;
        on_resolved(&kernel);

        let inputs = KernelBuffer::sample(kernel.signature(), seed);
        let mut outputs = inputs.clone();
        // SAFETY: forwarded to the caller.
        unsafe { kernel.invoke(&mut outputs) }?;
        (kernel.address() as usize, inputs, outputs)
    };
    library.close()?;

    info!(
        "{} returned (seed {seed}, {} buffer(s))",
        config.symbol,
        outputs.len()
    );
    Ok(InvocationReport {
        library_path: config.library_path.clone(),
        symbol: config.symbol.clone(),
        address,
        seed,
        inputs,
        outputs,
    })
}
