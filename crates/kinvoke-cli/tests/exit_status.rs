//! Integration test: the binary's exit status names the failing step.

use std::process::Command;

use kinvoke::InvokeStatus;
use kinvoke_test_utils::{fixture_library, skip, FIXTURE_KERNEL};

fn kinvoke() -> Command {
    Command::new(env!("CARGO_BIN_EXE_kinvoke"))
}

#[test]
fn missing_library_exits_with_library_not_found() {
    let out = kinvoke()
        .arg("/nonexistent/kinvoke/tmp_obj.so")
        .output()
        .unwrap();
    assert_eq!(
        out.status.code(),
        Some(InvokeStatus::LibraryNotFound.exit_code() as i32)
    );
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("cannot load library '/nonexistent/kinvoke/tmp_obj.so'"),
        "stderr: {stderr}"
    );
    assert!(
        !stderr.contains("LibraryNotFound {"),
        "debug form stays below the default log level: {stderr}"
    );
    assert!(out.stdout.is_empty(), "nothing is printed before resolve");
}

#[test]
fn invalid_config_exits_with_config_error() {
    let out = kinvoke().args(["--arg-lens", "1,0"]).output().unwrap();
    assert_eq!(
        out.status.code(),
        Some(InvokeStatus::ConfigError.exit_code() as i32)
    );
}

#[test]
fn malformed_flag_exits_with_config_error() {
    let out = kinvoke().args(["--arg-lens", "1,two"]).output().unwrap();
    let code = out.status.code();
    assert_eq!(code, Some(InvokeStatus::ConfigError.exit_code() as i32));
    assert_ne!(code, Some(InvokeStatus::SymbolNotFound.exit_code() as i32));
    assert!(out.stdout.is_empty());
}

#[test]
fn help_exits_successfully() {
    let out = kinvoke().arg("--help").output().unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("--arg-lens"));
}

#[test]
fn fixture_run_prints_kernel_then_summary() {
    let Some(lib) = fixture_library(env!("CARGO_TARGET_TMPDIR")) else {
        skip("kinvoke-fixture cdylib not built; run `cargo build -p kinvoke-fixture`");
        return;
    };
    let out = kinvoke().arg(&lib).args(["--seed", "5"]).output().unwrap();
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(out.status.code(), Some(0), "stderr: {stderr}");

    let stdout = String::from_utf8_lossy(&out.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "stdout: {stdout}");
    let expected_prefix = format!("lib: <kernel {FIXTURE_KERNEL} at 0x");
    assert!(lines[0].starts_with(&expected_prefix), "got {}", lines[0]);
    assert_eq!(
        lines[1],
        format!("{FIXTURE_KERNEL} returned (f32[1], f32[2]; seed 5)")
    );
}

#[test]
#[cfg(all(target_os = "linux", target_env = "gnu"))]
fn missing_symbol_exits_with_symbol_not_found() {
    let out = kinvoke()
        .args(["libm.so.6", "--symbol", "add_kernel_0d1d2c"])
        .output()
        .unwrap();
    assert_eq!(
        out.status.code(),
        Some(InvokeStatus::SymbolNotFound.exit_code() as i32)
    );
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("symbol 'add_kernel_0d1d2c' not found"));
}
