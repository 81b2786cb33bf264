//! Resilience primitives for request retries
//!
//! This module provides the pieces a client needs to retry a logical request
//! without pulling in a full retry executor:
//! - **Backoff strategies**: fixed, linear and exponential delay schedules
//! - **Retry state**: per-request attempt accounting with a bounded budget
//! - **Cancellable sleeps** (`runtime` tier): backoff waits that end early
//!   when the owning context is torn down
//!
//! The request layer drives the loop itself because a 401 replay and a
//! transport retry share one attempt budget; see `partnerdesk-infra::http`.

pub mod retry;
#[cfg(feature = "runtime")]
pub mod sleep;

pub use retry::{BackoffStrategy, RetryState};
#[cfg(feature = "runtime")]
pub use sleep::{sleep_with_cancel, SleepOutcome};
