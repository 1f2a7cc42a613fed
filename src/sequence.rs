//! Stale-response detection for overlapping lookups.
//!
//! Each lookup takes a ticket before it starts. When it completes, the
//! result is only accepted if no newer ticket has been issued in the
//! meantime; otherwise it is dropped.

use std::sync::atomic::{AtomicU64, Ordering};

/// Proof that a lookup was started, tagged with its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    seq: u64,
    input: String,
}

impl RequestTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Monotonic ticket issuer for one input field.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self, input: &str) -> RequestTicket {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket {
            seq,
            input: input.to_string(),
        }
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.seq
    }

    /// Pass `value` through only if `ticket` is still the latest issued.
    pub fn accept<T>(&self, ticket: &RequestTicket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            tracing::debug!(
                seq = ticket.seq,
                input = %ticket.input,
                "Discarding stale response"
            );
            None
        }
    }
}
