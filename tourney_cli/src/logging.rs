//! Structured logging configuration.
//!
//! Log output goes to stderr so command output on stdout stays clean. The
//! engine logs through the `log` facade; those records are picked up by the
//! subscriber as well.

use std::time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging
///
/// Log levels are configurable via the `RUST_LOG` env var (default `info`).
///
/// # Example
///
/// ```no_run
/// use tourney_cli::logging;
///
/// logging::init();
/// tracing::info!("CLI starting");
/// ```
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::debug!("Structured logging initialized");
}

/// Log a completed command with its duration
///
/// # Arguments
///
/// * `command` - Command name
/// * `elapsed` - Time spent executing it
/// * `changed` - Whether the command produced a new state
pub fn log_command(command: &str, elapsed: Duration, changed: bool) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
    if duration_ms > 1000 {
        tracing::warn!(
            command = command,
            duration_ms = duration_ms,
            changed = changed,
            "Slow command"
        );
    } else {
        tracing::debug!(
            command = command,
            duration_ms = duration_ms,
            changed = changed,
            "Command completed"
        );
    }
}

/// Log a rejected command
///
/// # Arguments
///
/// * `command` - Command name
/// * `reason` - Why it was rejected
pub fn log_rejected(command: &str, reason: &str) {
    tracing::warn!(command = command, "Rejected: {}", reason);
}
