//! Test helpers for kinvoke development.
//!
//! Locates real shared libraries to load in tests: the platform math
//! library (always present, exports `cos`) and the `kinvoke-fixture`
//! cdylib (present once the workspace has been built). Tests that need a
//! library which is absent call [`skip`] and return.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding the fixture library location.
pub const FIXTURE_ENV: &str = "KINVOKE_FIXTURE_LIB";

/// Crate name of the fixture cdylib.
pub const FIXTURE_CRATE: &str = "kinvoke_fixture";

/// Kernel exported by the fixture and by toolchain-built `tmp_obj.so`.
pub const FIXTURE_KERNEL: &str = "add_kernel_0d1d2c";

/// A system library exporting `double cos(double)`, by loader name.
pub fn system_math_library() -> Option<&'static str> {
    if cfg!(all(target_os = "linux", target_env = "gnu")) {
        Some("libm.so.6")
    } else if cfg!(target_os = "macos") {
        Some("/usr/lib/libSystem.B.dylib")
    } else if cfg!(target_os = "windows") {
        Some("ucrtbase.dll")
    } else {
        None
    }
}

/// Locate the built fixture cdylib.
///
/// Checks [`FIXTURE_ENV`] first, then the `debug` and `release` output
/// directories next to `target_tmpdir` (pass `env!("CARGO_TARGET_TMPDIR")`
/// from an integration test).
pub fn fixture_library(target_tmpdir: &str) -> Option<PathBuf> {
    if let Ok(path) = env::var(FIXTURE_ENV) {
        let path = PathBuf::from(path);
        return path.is_file().then_some(path);
    }
    let target = Path::new(target_tmpdir).parent()?;
    let file_name = libloading::library_filename(FIXTURE_CRATE);
    ["debug", "release"]
        .iter()
        .flat_map(|profile| {
            let dir = target.join(profile);
            [dir.join(&file_name), dir.join("deps").join(&file_name)]
        })
        .find(|p| p.is_file())
}

/// Report a skipped test on stderr.
pub fn skip(reason: &str) {
    eprintln!("skipping: {reason}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_lookup_misses_in_empty_target() {
        let dir = env::temp_dir().join("kinvoke-test-utils-empty").join("tmp");
        if env::var(FIXTURE_ENV).is_err() {
            assert_eq!(fixture_library(dir.to_str().unwrap()), None);
        }
    }

    #[test]
    fn math_library_known_on_common_platforms() {
        if cfg!(any(
            all(target_os = "linux", target_env = "gnu"),
            target_os = "macos"
        )) {
            assert!(system_math_library().is_some());
        }
    }
}
