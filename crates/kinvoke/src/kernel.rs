//! A resolved buffer kernel and its native call.

use std::ffi::c_void;
use std::fmt;
use std::mem;

use libloading::Symbol;
use log::info;
use smallvec::SmallVec;

use crate::buffer::KernelBuffer;
use crate::error::InvokeError;
use crate::signature::{KernelSignature, MAX_KERNEL_ARGS};

type Fn0 = unsafe extern "C" fn();
type Fn1 = unsafe extern "C" fn(*mut f32);
type Fn2 = unsafe extern "C" fn(*mut f32, *mut f32);
type Fn3 = unsafe extern "C" fn(*mut f32, *mut f32, *mut f32);
type Fn4 = unsafe extern "C" fn(*mut f32, *mut f32, *mut f32, *mut f32);

/// An exported kernel resolved from a [`KernelLibrary`](crate::KernelLibrary).
///
/// Borrows the library for `'lib`. The address is never null.
pub struct Kernel<'lib> {
    name: String,
    signature: KernelSignature,
    symbol: Symbol<'lib, *mut c_void>,
}

impl<'lib> Kernel<'lib> {
    pub(crate) fn new(
        name: String,
        signature: KernelSignature,
        symbol: Symbol<'lib, *mut c_void>,
    ) -> Self {
        Self {
            name,
            signature,
            symbol,
        }
    }

    /// Exported name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared signature.
    pub fn signature(&self) -> &KernelSignature {
        &self.signature
    }

    /// Entry address in this process.
    pub fn address(&self) -> *const c_void {
        *self.symbol
    }

    /// Call the kernel with one pointer per buffer, discarding any return
    /// value.
    ///
    /// The buffers are checked against the declared signature first; the
    /// native code is not entered on a mismatch.
    ///
    /// # Errors
    ///
    /// [`InvokeError::ArgumentCountMismatch`] or
    /// [`InvokeError::BufferLengthMismatch`].
    ///
    /// # Safety
    ///
    /// The export must really be a C function taking
    /// [`arity`](KernelSignature::arity) `float*` parameters and must stay
    /// within the declared lengths. Otherwise behaviour is undefined: a
    /// crash here is not caught and terminates the process.
    #[allow(unsafe_code)]
    pub unsafe fn invoke(&self, buffers: &mut [KernelBuffer]) -> Result<(), InvokeError> {
        self.signature.check(buffers)?;
        let args: SmallVec<[*mut f32; MAX_KERNEL_ARGS]> =
            buffers.iter_mut().map(KernelBuffer::as_mut_ptr).collect();
        let addr = *self.symbol;

        info!("invoking {} with {} buffer(s)", self.name, args.len());
        // SAFETY: addr is non-null and the caller vouches for the C
        // signature; the buffers outlive the call.
        unsafe {
            match args.as_slice() {
                [] => mem::transmute::<*mut c_void, Fn0>(addr)(),
                &[a] => mem::transmute::<*mut c_void, Fn1>(addr)(a),
                &[a, b] => mem::transmute::<*mut c_void, Fn2>(addr)(a, b),
                &[a, b, c] => mem::transmute::<*mut c_void, Fn3>(addr)(a, b, c),
                &[a, b, c, d] => mem::transmute::<*mut c_void, Fn4>(addr)(a, b, c, d),
                _ => unreachable!("signature arity is bounded by MAX_KERNEL_ARGS"),
            }
        }
        Ok(())
    }
}

impl fmt::Display for Kernel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<kernel {} at {:p}>", self.name, *self.symbol)
    }
}

impl fmt::Debug for Kernel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kernel")
            .field("name", &self.name)
            .field("address", &self.address())
            .field("signature", &self.signature)
            .finish()
    }
}
