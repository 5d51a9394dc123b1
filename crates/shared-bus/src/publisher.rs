//! # Transport and In-Memory Broker
//!
//! Defines the transport collaborator the hub core depends on, and an
//! in-process broker implementing it.

use crate::message::{ClientId, Delivery, TopicFilter};
use crate::subscriber::Subscription;
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::Envelope;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

/// Errors from transport operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The broker was shut down.
    #[error("Broker closed")]
    Closed,

    /// Topic name cannot be published to.
    #[error("Invalid topic name: {0:?}")]
    InvalidTopic(String),

    /// Envelope could not be encoded.
    #[error("Encoding failed: {0}")]
    Encode(String),
}

/// Publish/subscribe interface to the broker.
///
/// The hub core never opens connections itself; it only consumes deliveries
/// and hands bytes back through this trait.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Publish raw bytes on a channel.
    ///
    /// # Returns
    ///
    /// The number of active subscriptions the message was handed to.
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<usize, TransportError>;

    /// Subscribe to channels matching a filter.
    fn subscribe(&self, filter: TopicFilter) -> Subscription;

    /// Encode an envelope and publish it on its own topic.
    async fn publish_envelope(&self, envelope: &Envelope) -> Result<usize, TransportError> {
        let bytes = envelope
            .to_bytes()
            .map_err(|e| TransportError::Encode(e.to_string()))?;
        self.publish(envelope.topic().as_str(), bytes).await
    }
}

struct BrokerInner {
    /// `None` once closed. Dropping the sender ends every subscription
    /// after its buffered deliveries.
    sender: RwLock<Option<broadcast::Sender<Delivery>>>,
    published: AtomicU64,
    capacity: usize,
}

/// In-memory broker.
///
/// Uses `tokio::sync::broadcast` for multi-producer, multi-consumer fan-out.
/// Each participant talks to it through its own [`BrokerClient`].
#[derive(Clone)]
pub struct InMemoryBroker {
    inner: Arc<BrokerInner>,
}

impl InMemoryBroker {
    /// Create a broker with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a broker buffering up to `capacity` messages per subscriber.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            inner: Arc::new(BrokerInner {
                sender: RwLock::new(Some(sender)),
                published: AtomicU64::new(0),
                capacity: capacity.max(1),
            }),
        }
    }

    /// Connect a new client with a fresh identity.
    #[must_use]
    pub fn client(&self) -> BrokerClient {
        let client = BrokerClient {
            id: Uuid::new_v4(),
            inner: self.inner.clone(),
        };
        debug!(client = %client.id, "Broker client connected");
        client
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .sender
            .read()
            .as_ref()
            .map_or(0, broadcast::Sender::receiver_count)
    }

    /// Total publish attempts accepted by the broker.
    #[must_use]
    pub fn messages_published(&self) -> u64 {
        self.inner.published.load(Ordering::Relaxed)
    }

    /// Per-subscriber buffer size.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Refuse further publications and end every subscription once it
    /// has drained what was already delivered to it.
    pub fn close(&self) {
        if self.inner.sender.write().take().is_some() {
            debug!("Broker closed");
        }
    }

    /// Whether [`InMemoryBroker::close`] was called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.sender.read().is_none()
    }
}

impl Default for InMemoryBroker {
    fn default() -> Self {
        Self::new()
    }
}

/// A connection to an [`InMemoryBroker`].
#[derive(Clone)]
pub struct BrokerClient {
    id: ClientId,
    inner: Arc<BrokerInner>,
}

impl BrokerClient {
    /// This client's identity.
    #[must_use]
    pub fn id(&self) -> ClientId {
        self.id
    }
}

#[async_trait]
impl Transport for BrokerClient {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<usize, TransportError> {
        if topic.is_empty() || topic.contains(['#', '+']) {
            return Err(TransportError::InvalidTopic(topic.to_owned()));
        }

        let delivery = Delivery {
            topic: topic.to_owned(),
            payload: Arc::from(payload),
            origin: self.id,
        };

        let sent = {
            let sender = self.inner.sender.read();
            let Some(sender) = sender.as_ref() else {
                return Err(TransportError::Closed);
            };
            self.inner.published.fetch_add(1, Ordering::Relaxed);
            sender.send(delivery)
        };

        match sent {
            Ok(receivers) => {
                debug!(topic, client = %self.id, receivers, "Message published");
                Ok(receivers)
            }
            Err(_) => {
                debug!(topic, client = %self.id, "Message dropped (no subscribers)");
                Ok(0)
            }
        }
    }

    fn subscribe(&self, filter: TopicFilter) -> Subscription {
        debug!(client = %self.id, topics = ?filter.topics, "New subscription created");
        let receiver = match self.inner.sender.read().as_ref() {
            Some(sender) => sender.subscribe(),
            // Already closed: the receiver reports closure on first use.
            None => broadcast::channel(1).1,
        };
        Subscription::new(receiver, filter, self.id)
    }
}
