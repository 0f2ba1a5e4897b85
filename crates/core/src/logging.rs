//! Log initialization for embedding hosts.
//!
//! Resolution is a library concern, so nothing here runs implicitly; a host
//! that wants file logs calls [`init_logging`] once and keeps the returned
//! guard alive for the lifetime of the process.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable consulted for the filter before `RUST_LOG`.
pub const LOG_ENV_VAR: &str = "LOADSTONE_LOG";

/// Initialize logging into the default per-user directory
/// (`~/.loadstone/logs`), rolling daily with the component name as the file
/// prefix.
pub fn init_logging(component: &str, to_stderr: bool) -> WorkerGuard {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    init_logging_at(&Path::new(&home).join(".loadstone/logs"), component, to_stderr)
}

/// Initialize logging into an explicit directory. Filtering honors
/// `LOADSTONE_LOG`, then `RUST_LOG`, then defaults to `info`.
pub fn init_logging_at(log_dir: &Path, component: &str, to_stderr: bool) -> WorkerGuard {
    let _ = std::fs::create_dir_all(log_dir);

    let file_appender = tracing_appender::rolling::daily(log_dir, component);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // File layer: no ANSI colors
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    if to_stderr {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);
        registry.with(stderr_layer).init();
    } else {
        registry.init();
    }

    guard
}
