//! Scoped ownership of a loaded shared library.
//!
//! [`KernelLibrary`] owns the loader handle. Every [`Kernel`] resolved from
//! it borrows the library, so no symbol can outlive the mapping it points
//! into. The handle is released when dropped, or explicitly with
//! [`close`](KernelLibrary::close) to observe unload errors.

use std::ffi::c_void;
use std::fmt;
use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};
use log::debug;

use crate::error::InvokeError;
use crate::kernel::Kernel;
use crate::signature::KernelSignature;

/// Why `name` cannot be passed to the platform loader, if it cannot.
pub(crate) fn symbol_name_error(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        Some("name is empty")
    } else if name.contains('\0') {
        Some("name contains a NUL byte")
    } else {
        None
    }
}

fn check_symbol_name(name: &str) -> Result<(), InvokeError> {
    match symbol_name_error(name) {
        Some(reason) => Err(InvokeError::InvalidSymbolName {
            symbol: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// A shared library loaded into this process.
pub struct KernelLibrary {
    path: PathBuf,
    library: Library,
}

impl KernelLibrary {
    /// Load the library at `path`.
    ///
    /// A bare file name (no directory separator) is looked up on the
    /// platform's library search path.
    ///
    /// # Errors
    ///
    /// [`InvokeError::LibraryNotFound`] if the path does not exist or is not
    /// a loadable library for this platform and architecture.
    ///
    /// # Safety
    ///
    /// Loading runs the library's initialisation routines, which may do
    /// anything. The caller vouches for the library.
    #[allow(unsafe_code)]
    pub unsafe fn open(path: impl AsRef<Path>) -> Result<Self, InvokeError> {
        let path = path.as_ref().to_path_buf();
        // SAFETY: forwarded to the caller.
        let library = unsafe { Library::new(&path) }.map_err(|source| {
            InvokeError::LibraryNotFound {
                path: path.clone(),
                source,
            }
        })?;
        debug!("loaded library {}", path.display());
        Ok(Self { path, library })
    }

    /// Path the library was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve a buffer kernel by name under a declared signature.
    ///
    /// # Errors
    ///
    /// - [`InvokeError::InvalidSymbolName`] if `name` is empty or has a NUL.
    /// - [`InvokeError::SymbolNotFound`] if the library does not export it.
    /// - [`InvokeError::NullSymbol`] if the export's address is null.
    pub fn resolve(
        &self,
        name: &str,
        signature: KernelSignature,
    ) -> Result<Kernel<'_>, InvokeError> {
        let symbol = self.raw_symbol(name)?;
        Ok(Kernel::new(name.to_string(), signature, symbol))
    }

    /// Resolve an export under an arbitrary function-pointer type `F`.
    ///
    /// For kernels whose parameters are not `f32` buffers, e.g.
    /// `unsafe extern "C" fn(f64) -> f64`. The export is looked up once as
    /// `Option<F>`, so a null address becomes `None` rather than an invalid
    /// function pointer.
    ///
    /// # Errors
    ///
    /// As for [`resolve`](Self::resolve).
    ///
    /// # Safety
    ///
    /// `F` must be a function-pointer type matching the export's real
    /// signature. Calling through a mismatched `F` is undefined behaviour.
    #[allow(unsafe_code)]
    pub unsafe fn resolve_typed<F: Copy>(&self, name: &str) -> Result<Symbol<'_, F>, InvokeError> {
        check_symbol_name(name)?;
        // SAFETY: F is a function pointer per the caller contract, so
        // Option<F> is pointer-sized with None as null.
        let symbol = unsafe { self.library.get::<Option<F>>(name.as_bytes()) }.map_err(
            |source| InvokeError::SymbolNotFound {
                symbol: name.to_string(),
                source,
            },
        )?;
        let symbol = symbol.lift_option().ok_or_else(|| InvokeError::NullSymbol {
            symbol: name.to_string(),
        })?;
        debug!("resolved {name} (typed) in {}", self.path.display());
        Ok(symbol)
    }

    /// Unload the library, reporting loader errors.
    ///
    /// Dropping a `KernelLibrary` also unloads it but discards any error.
    pub fn close(self) -> Result<(), InvokeError> {
        let Self { path, library } = self;
        library
            .close()
            .map_err(|source| InvokeError::CloseFailed {
                path: path.clone(),
                source,
            })?;
        debug!("closed library {}", path.display());
        Ok(())
    }

    /// Look up `name` as an untyped, non-null address.
    #[allow(unsafe_code)]
    fn raw_symbol(&self, name: &str) -> Result<Symbol<'_, *mut c_void>, InvokeError> {
        check_symbol_name(name)?;
        // SAFETY: a data-pointer view of the export is never dereferenced
        // here; it is only inspected for null.
        let symbol = unsafe { self.library.get::<*mut c_void>(name.as_bytes()) }.map_err(
            |source| InvokeError::SymbolNotFound {
                symbol: name.to_string(),
                source,
            },
        )?;
        if symbol.is_null() {
            return Err(InvokeError::NullSymbol {
                symbol: name.to_string(),
            });
        }
        debug!("resolved {name} at {:p} in {}", *symbol, self.path.display());
        Ok(symbol)
    }
}

impl fmt::Debug for KernelLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KernelLibrary")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
