//! Logging initialization
//!
//! jobscope only emits `tracing` events; binaries embedding it may call
//! [`init_logging`] to get a formatted subscriber.

use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Get the log filter string for a verbosity level
pub fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Install a global formatting subscriber.
///
/// `RUST_LOG` takes precedence over `verbose`. Calling this more than once
/// leaves the first subscriber in place.
pub fn init_logging(verbose: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level(verbose)));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose >= 2)
        .with_line_number(verbose >= 2)
        .try_init()
        .is_ok();

    if installed {
        debug!("jobscope logging initialized at verbosity {}", verbose);
    }
}
