//! Reference kernel for kinvoke end-to-end tests.
//!
//! Built as a `cdylib`, this crate stands in for a toolchain-emitted
//! `tmp_obj.so`: it exports `add_kernel_0d1d2c(float*, float*)` with the
//! C calling convention. cbindgen writes the matching declaration to
//! `include/kinvoke_fixture.h`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

/// Add `x[0]` into `y[0]`.
///
/// Touches exactly one element of each buffer, so it is safe to call with
/// the smoke-test shapes (one and two elements). Null pointers are ignored.
///
/// # Safety
///
/// Non-null pointers must be valid for reading (`x`) and writing (`y`) one
/// `f32`, and must not alias.
#[no_mangle]
#[allow(unsafe_code)]
pub unsafe extern "C" fn add_kernel_0d1d2c(x: *const f32, y: *mut f32) {
    if x.is_null() || y.is_null() {
        return;
    }
    // SAFETY: non-null and valid per caller contract.
    unsafe { *y += *x };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(unsafe_code)]
    fn adds_first_elements_only() {
        let x = [1.5f32];
        let mut y = [2.0f32, 7.0];
        // SAFETY: both buffers hold at least one element.
        unsafe { add_kernel_0d1d2c(x.as_ptr(), y.as_mut_ptr()) };
        assert_eq!(x, [1.5]);
        assert_eq!(y, [3.5, 7.0]);
    }

    #[test]
    #[allow(unsafe_code)]
    fn null_pointers_are_ignored() {
        let mut y = [2.0f32];
        // SAFETY: null inputs are handled without dereferencing.
        unsafe {
            add_kernel_0d1d2c(std::ptr::null(), y.as_mut_ptr());
            add_kernel_0d1d2c(std::ptr::null(), std::ptr::null_mut());
        }
        assert_eq!(y, [2.0]);
    }
}
