//! Cancellable backoff sleeps

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

/// How a backoff sleep ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepOutcome {
    /// The full delay elapsed.
    Elapsed,
    /// The token was cancelled before the delay elapsed.
    Cancelled,
}

/// Sleep for `delay` unless `cancel` fires first.
///
/// A zero delay returns immediately (after a cancellation check) without
/// touching the timer wheel.
pub async fn sleep_with_cancel(delay: Duration, cancel: &CancellationToken) -> SleepOutcome {
    if cancel.is_cancelled() {
        return SleepOutcome::Cancelled;
    }
    if delay.is_zero() {
        return SleepOutcome::Elapsed;
    }

    tokio::select! {
        () = cancel.cancelled() => {
            debug!(delay_ms = delay.as_millis() as u64, "backoff sleep cancelled");
            SleepOutcome::Cancelled
        }
        () = tokio::time::sleep(delay) => SleepOutcome::Elapsed,
    }
}
