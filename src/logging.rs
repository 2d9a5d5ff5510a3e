//! Log sink setup.
//!
//! Plain human-readable lines on stderr: no timestamps, no targets. `RUST_LOG`
//! takes precedence over the verbosity level when it is set.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Map a CLI verbosity level to a filter directive.
pub fn level_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "off",
        1 => "error",
        2 => "warn",
        3 | 4 => "info",
        _ => "trace",
    }
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}
