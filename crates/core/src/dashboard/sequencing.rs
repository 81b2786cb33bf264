//! Stale-response guard
//!
//! Loads and mutations may overlap. Each one takes a ticket before its call
//! goes out; when the response arrives it is applied only if no newer ticket
//! has been applied in the meantime. Every independently updated piece of
//! state owns its own sequencer.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic stamp taken before a request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct ResponseSequencer {
    issued: AtomicU64,
    applied: AtomicU64,
}

impl ResponseSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next ticket. Tickets start at 1.
    pub fn issue(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Mark `ticket` applied if it is newer than everything applied so far.
    ///
    /// Returns `false` for a stale response, which the caller must discard.
    pub fn try_apply(&self, ticket: Ticket) -> bool {
        self.applied
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |applied| {
                (ticket.0 > applied).then_some(ticket.0)
            })
            .is_ok()
    }

    /// Whether a newer ticket than `ticket` has already been applied.
    ///
    /// Unlike [`try_apply`](Self::try_apply) this never advances the sequencer,
    /// so partial patches can check against wholesale replacements.
    pub fn is_superseded(&self, ticket: Ticket) -> bool {
        self.applied.load(Ordering::SeqCst) > ticket.0
    }

    /// Newest applied ticket, if any.
    pub fn last_applied(&self) -> Option<Ticket> {
        match self.applied.load(Ordering::SeqCst) {
            0 => None,
            n => Some(Ticket(n)),
        }
    }
}
