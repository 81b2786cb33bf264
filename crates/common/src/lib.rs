//! Modular common utilities shared across PartnerDesk crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: validation, serde helpers, backoff arithmetic
//! - `runtime`: async helpers (cancellable backoff sleeps, retry logging)

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod resilience;
#[cfg(feature = "foundation")]
pub mod validation;
#[cfg(feature = "foundation")]
pub mod utils;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "foundation")]
pub use resilience::{BackoffStrategy, RetryState};
#[cfg(feature = "runtime")]
pub use resilience::{sleep_with_cancel, SleepOutcome};
#[cfg(feature = "foundation")]
pub use utils::serde::{duration_millis, string_or_number};
#[cfg(feature = "foundation")]
pub use validation::{
    FieldError, FieldValidator, RangeValidator, StringValidator, ValidationError,
    ValidationResult,
};
