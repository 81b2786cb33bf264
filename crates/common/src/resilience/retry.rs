//! Backoff schedules and per-request retry accounting
//!
//! `RetryState` is scoped to one logical request (including any replay after
//! a token refresh). Its invariant is `attempt <= max_attempts`: the initial
//! try is attempt 0 and each retry increments the counter by one.

use std::time::Duration;

/// Backoff strategy for calculating retry delays
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackoffStrategy {
    /// Fixed delay between retries
    Fixed(Duration),
    /// Linear backoff: initial_delay + (attempt * increment)
    Linear { initial_delay: Duration, increment: Duration },
    /// Exponential backoff: initial_delay * 2^attempt, capped at max_delay
    Exponential { initial_delay: Duration, max_delay: Duration },
}

impl BackoffStrategy {
    /// Linear schedule where the n-th retry waits `base * (n + 1)`.
    #[must_use]
    pub fn linear(base: Duration) -> Self {
        Self::Linear { initial_delay: base, increment: base }
    }

    /// Calculate the delay before the retry that follows `attempt`.
    ///
    /// `attempt` is zero-based: the wait after the first failed try is
    /// `calculate_delay(0)`.
    #[must_use]
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        match self {
            Self::Fixed(delay) => *delay,
            Self::Linear { initial_delay, increment } => {
                initial_delay.saturating_add(increment.saturating_mul(attempt))
            }
            Self::Exponential { initial_delay, max_delay } => {
                let multiplier = 1u32 << attempt.min(16);
                initial_delay.saturating_mul(multiplier).min(*max_delay)
            }
        }
    }
}

/// Attempt accounting for a single logical request.
#[derive(Debug, Clone)]
pub struct RetryState {
    attempt: u32,
    max_attempts: u32,
    backoff: BackoffStrategy,
}

impl RetryState {
    /// Start a fresh chain with `max_attempts` retries available after the
    /// initial try.
    #[must_use]
    pub fn new(max_attempts: u32, backoff: BackoffStrategy) -> Self {
        Self { attempt: 0, max_attempts, backoff }
    }

    /// Zero-based number of the attempt about to be (or being) made.
    #[must_use]
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Configured retry budget.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Whether another attempt may follow the current one.
    #[must_use]
    pub fn can_retry(&self) -> bool {
        self.attempt < self.max_attempts
    }

    /// Delay to wait before the next attempt.
    #[must_use]
    pub fn next_delay(&self) -> Duration {
        self.backoff.calculate_delay(self.attempt)
    }

    /// Consume one unit of the retry budget.
    ///
    /// Returns `false` (and leaves the state untouched) once the budget is
    /// exhausted.
    pub fn advance(&mut self) -> bool {
        if !self.can_retry() {
            return false;
        }
        self.attempt += 1;
        true
    }

    /// Sum of every backoff delay a fully exhausted chain would wait.
    #[must_use]
    pub fn total_backoff(&self) -> Duration {
        (0..self.max_attempts)
            .map(|attempt| self.backoff.calculate_delay(attempt))
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}
