use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of ingress activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngressStats {
    /// Deliveries seen.
    pub received: u64,
    /// Deliveries that passed validation.
    pub accepted: u64,
    /// Deliveries refused by the validator.
    pub rejected: u64,
    /// Accepted requests with no bound handler.
    pub not_implemented: u64,
    /// Accepted requests a handler could not process.
    pub handler_failures: u64,
    /// Envelopes published in reply, error signals included.
    pub published: u64,
}

#[derive(Debug, Default)]
pub(crate) struct Counters {
    pub received: AtomicU64,
    pub accepted: AtomicU64,
    pub rejected: AtomicU64,
    pub not_implemented: AtomicU64,
    pub handler_failures: AtomicU64,
    pub published: AtomicU64,
}

impl Counters {
    pub fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> IngressStats {
        IngressStats {
            received: self.received.load(Ordering::Relaxed),
            accepted: self.accepted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            not_implemented: self.not_implemented.load(Ordering::Relaxed),
            handler_failures: self.handler_failures.load(Ordering::Relaxed),
            published: self.published.load(Ordering::Relaxed),
        }
    }
}
