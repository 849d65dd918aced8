//! `kinvoke`: smoke-test a compiled kernel library.
//!
//! Prints the resolved kernel before calling it, then a one-line summary.
//! Any failure ends the process with the error's status code; malformed
//! flags exit with the config-error code.

#![deny(missing_docs)]
#![deny(unsafe_code)]

mod args;

use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use kinvoke::{run, InvocationReport, InvokeError, InvokeStatus};
use log::debug;

use crate::args::Args;

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help and --version are not failures.
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(InvokeStatus::ConfigError.exit_code());
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .init();

    let config = args.to_config();
    // SAFETY: the operator names the library and vouches that its kernel
    // takes one `float*` per `--arg-lens` entry.
    #[allow(unsafe_code)]
    let outcome = unsafe { run(&config, |kernel| println!("lib: {kernel}")) };

    match outcome {
        Ok(report) => {
            println!("{}", summary(&report));
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_error(&e);
            ExitCode::from(InvokeStatus::from(&e).exit_code())
        }
    }
}

fn summary(report: &InvocationReport) -> String {
    let shapes: Vec<String> = report
        .outputs
        .iter()
        .map(|b| format!("f32[{}]", b.len()))
        .collect();
    format!(
        "{} returned ({}; seed {})",
        report.symbol,
        shapes.join(", "),
        report.seed
    )
}

fn report_error(e: &InvokeError) {
    debug!("{e:?}");
    eprintln!("error: {e}");
    let mut source = e.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
