//! Command-line flags for the `kinvoke` binary.

use std::path::PathBuf;

use clap::Parser;
use kinvoke::{InvokeConfig, DEFAULT_LIBRARY_PATH, DEFAULT_SYMBOL};

/// Load a compiled kernel library and call one exported kernel with
/// standard-normal sample buffers.
#[derive(Debug, Parser, Clone)]
#[command(name = "kinvoke", version, about)]
pub struct Args {
    /// Shared library to load
    #[arg(default_value = DEFAULT_LIBRARY_PATH)]
    pub library: PathBuf,

    /// Exported kernel symbol to call
    #[arg(long, default_value = DEFAULT_SYMBOL)]
    pub symbol: String,

    /// Element count of each `float*` parameter, in call order
    #[arg(long, value_delimiter = ',', default_values_t = [1usize, 2])]
    pub arg_lens: Vec<usize>,

    /// Seed for the sample buffers (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Verbosity level (`error`, `warn`, `info`, `debug`, `trace`)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Incremental verbosity (`-v`, `-vv`, etc.)
    #[arg(short, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Log filter after applying `-v` on top of `--log-level`.
    pub fn log_filter(&self) -> &str {
        match self.verbose {
            0 => &self.log_level,
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Invocation config described by these flags.
    pub fn to_config(&self) -> InvokeConfig {
        InvokeConfig {
            library_path: self.library.clone(),
            symbol: self.symbol.clone(),
            arg_lens: self.arg_lens.clone(),
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_match_library_defaults() {
        let args = Args::try_parse_from(["kinvoke"]).unwrap();
        assert_eq!(args.to_config(), InvokeConfig::default());
        assert_eq!(args.log_filter(), "warn");
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "kinvoke",
            "./libkernel.so",
            "--symbol",
            "mul_kernel_0d1d2d3",
            "--arg-lens",
            "4,4,4",
            "--seed",
            "9",
            "-vv",
        ])
        .unwrap();
        let cfg = args.to_config();
        assert_eq!(cfg.library_path, PathBuf::from("./libkernel.so"));
        assert_eq!(cfg.symbol, "mul_kernel_0d1d2d3");
        assert_eq!(cfg.arg_lens, vec![4, 4, 4]);
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(args.log_filter(), "debug");
    }

    #[test]
    fn non_numeric_length_rejected() {
        assert!(Args::try_parse_from(["kinvoke", "--arg-lens", "1,two"]).is_err());
    }
}
