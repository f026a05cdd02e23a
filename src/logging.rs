//! Logging setup.
//!
//! Diagnostics go to stderr (or a log file) through `tracing`; stdout is
//! reserved for results. `RUST_LOG` takes precedence over the verbosity
//! flags.

use anyhow::{Context, anyhow};
use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const CRATE_TARGET: &str = "board_export";

/// Filter directives for the given verbosity.
///
/// Other crates stay at `warn`; this crate logs at `info` by default,
/// `debug` with `-v`, `trace` with `-vv`, and errors only with `-q`.
#[must_use]
pub fn default_directives(verbose: u8, quiet: bool) -> String {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let others = if quiet { "error" } else { "warn" };
    format!("{others},{CRATE_TARGET}={level}")
}

fn build_filter(verbose: u8, quiet: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose, quiet)))
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global
/// subscriber is already installed.
pub fn init_logging(verbose: u8, quiet: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose, quiet))
        .with_target(verbose > 0);

    let installed = if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
    } else {
        builder
            .with_ansi(io::stderr().is_terminal())
            .with_writer(io::stderr)
            .try_init()
    };

    installed.map_err(|err| anyhow!("failed to install logger: {err}"))
}

/// Route logs through the test harness's captured output.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("{CRATE_TARGET}=debug")))
        .with_test_writer()
        .try_init();
}
