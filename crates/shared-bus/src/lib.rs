//! # Shared Bus - Hub Transport
//!
//! The publish/subscribe collaborator between the hub and the cloud.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │  Hub gateway │                    │    Cloud     │
//! │              │    publish()       │              │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │    Broker    │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! Hub and cloud share the same five topics in both directions. The hub
//! subscribes with [`TopicFilter::no_local`] so its own signals are not fed
//! back into ingress.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod message;
pub mod publisher;
pub mod subscriber;

pub use message::{ClientId, Delivery, TopicFilter};
pub use publisher::{BrokerClient, InMemoryBroker, Transport, TransportError};
pub use subscriber::{Subscription, SubscriptionError};

/// Maximum deliveries to buffer per subscriber before the oldest are dropped.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        assert_eq!(DEFAULT_CHANNEL_CAPACITY, 1024);
    }
}
