//! Declared native signatures for buffer kernels.
//!
//! A [`KernelSignature`] lists the kernel's `f32*` parameters in order,
//! each with the element count the kernel expects behind the pointer.
//! Supplied buffers are checked against it before every native call. The
//! declaration itself is trusted: nothing can confirm that the library's
//! real function takes the same parameters.

use smallvec::SmallVec;

use crate::buffer::KernelBuffer;
use crate::error::InvokeError;

/// Maximum number of buffer parameters a kernel may declare.
pub const MAX_KERNEL_ARGS: usize = 4;

/// One `f32*` parameter of a kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferSpec {
    /// Number of `f32` elements the kernel may touch.
    pub len: usize,
}

/// Ordered buffer parameters of a kernel, called as
/// `extern "C" fn(*mut f32, ...)` with the return value discarded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KernelSignature {
    args: SmallVec<[BufferSpec; MAX_KERNEL_ARGS]>,
}

impl KernelSignature {
    /// Declare a signature from per-parameter element counts.
    ///
    /// Returns `None` if more than [`MAX_KERNEL_ARGS`] parameters are given.
    pub fn from_lens(lens: &[usize]) -> Option<Self> {
        if lens.len() > MAX_KERNEL_ARGS {
            return None;
        }
        Some(Self {
            args: lens.iter().map(|&len| BufferSpec { len }).collect(),
        })
    }

    /// Number of declared parameters.
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// Declared parameters in call order.
    pub fn args(&self) -> &[BufferSpec] {
        &self.args
    }

    /// Check supplied buffers against the declaration.
    pub fn check(&self, buffers: &[KernelBuffer]) -> Result<(), InvokeError> {
        if buffers.len() != self.args.len() {
            return Err(InvokeError::ArgumentCountMismatch {
                expected: self.args.len(),
                found: buffers.len(),
            });
        }
        for (index, (spec, buf)) in self.args.iter().zip(buffers).enumerate() {
            if spec.len != buf.len() {
                return Err(InvokeError::BufferLengthMismatch {
                    index,
                    expected: spec.len,
                    found: buf.len(),
                });
            }
        }
        Ok(())
    }
}
