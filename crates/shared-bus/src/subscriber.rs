//! # Subscriber
//!
//! Defines the receiving side of the broker.

use crate::message::{ClientId, Delivery, TopicFilter};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The broker was dropped.
    #[error("Broker closed")]
    Closed,
}

/// A subscription handle for receiving deliveries.
///
/// Dropping the handle unsubscribes.
pub struct Subscription {
    receiver: broadcast::Receiver<Delivery>,
    filter: TopicFilter,
    owner: ClientId,
}

impl Subscription {
    pub(crate) fn new(
        receiver: broadcast::Receiver<Delivery>,
        filter: TopicFilter,
        owner: ClientId,
    ) -> Self {
        Self {
            receiver,
            filter,
            owner,
        }
    }

    /// Receive the next delivery that matches the filter.
    ///
    /// # Returns
    ///
    /// - `Some(delivery)` - The next matching delivery
    /// - `None` - The broker was dropped
    pub async fn recv(&mut self) -> Option<Delivery> {
        loop {
            let delivery = match self.receiver.recv().await {
                Ok(d) => d,
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    warn!(client = %self.owner, lagged = count, "Subscriber lagged, deliveries dropped");
                    continue;
                }
            };

            if self.filter.matches(&delivery, self.owner) {
                return Some(delivery);
            }
        }
    }

    /// Try to receive the next delivery without blocking.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(delivery))` - A matching delivery was available
    /// - `Ok(None)` - Nothing available right now
    /// - `Err(SubscriptionError::Closed)` - The broker was dropped
    pub fn try_recv(&mut self) -> Result<Option<Delivery>, SubscriptionError> {
        loop {
            let delivery = match self.receiver.try_recv() {
                Ok(d) => d,
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            };

            if self.filter.matches(&delivery, self.owner) {
                return Ok(Some(delivery));
            }
        }
    }

    /// Get the filter for this subscription.
    #[must_use]
    pub fn filter(&self) -> &TopicFilter {
        &self.filter
    }

    /// Client that owns this subscription.
    #[must_use]
    pub fn owner(&self) -> ClientId {
        self.owner
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        debug!(client = %self.owner, topics = ?self.filter.topics, "Subscription dropped");
    }
}
