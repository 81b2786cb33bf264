use std::time::Duration;

use partnerdesk_domain::PartnerDeskError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set. Otherwise the level is `info`, or `debug` with
/// `verbose`. Logs go to stderr so command output on stdout stays clean.
pub fn init_logging(json: bool, verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose);

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = if json { builder.json().try_init() } else { builder.try_init() };
}

/// Log the outcome of a command execution with structured fields.
///
/// Callers must avoid forwarding sensitive values in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, success: bool) {
    let duration_ms = elapsed.as_millis() as u64;

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        warn!(command, duration_ms, "command_execution_failure");
    }
}

/// Convert a `PartnerDeskError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &PartnerDeskError) -> &'static str {
    match error {
        PartnerDeskError::Validation { .. } => "validation",
        PartnerDeskError::Http { .. } => "http",
        PartnerDeskError::Rejected(_) => "rejected",
        PartnerDeskError::Timeout => "timeout",
        PartnerDeskError::AuthExpired => "auth_expired",
        PartnerDeskError::Upload { .. } => "upload",
        PartnerDeskError::Network(_) => "network",
        PartnerDeskError::Decode(_) => "decode",
        PartnerDeskError::Cancelled => "cancelled",
        PartnerDeskError::Config(_) => "config",
        PartnerDeskError::Storage(_) => "storage",
        PartnerDeskError::Internal(_) => "internal",
    }
}
