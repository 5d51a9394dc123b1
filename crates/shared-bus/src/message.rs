//! # Bus Messages
//!
//! Raw deliveries flowing through the broker and the filters subscribers
//! use to select them.

use shared_types::Topic;
use std::sync::Arc;
use uuid::Uuid;

/// Identity of a connected broker client.
pub type ClientId = Uuid;

/// A published message as seen by subscribers.
///
/// Topic names are raw strings: the broker does not know the hub taxonomy,
/// so deliveries on unrecognized channels reach wildcard subscribers intact.
#[derive(Debug, Clone)]
pub struct Delivery {
    /// Channel name the message was published on.
    pub topic: String,
    /// Opaque payload bytes.
    pub payload: Arc<[u8]>,
    /// Client that published the message.
    pub origin: ClientId,
}

/// Filter for subscribing to specific channels.
#[derive(Debug, Clone, Default)]
pub struct TopicFilter {
    /// Channel names to include. Empty means every channel.
    pub topics: Vec<String>,
    /// Skip messages published by the subscribing client itself.
    pub no_local: bool,
}

impl TopicFilter {
    /// Accept every channel, including unknown ones.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Accept the listed channel names.
    #[must_use]
    pub fn topics<I, S>(topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            topics: topics.into_iter().map(Into::into).collect(),
            no_local: false,
        }
    }

    /// Accept the five hub topics.
    #[must_use]
    pub fn hub_topics() -> Self {
        Self::topics(Topic::ALL.iter().map(|t| t.as_str()))
    }

    /// Accept a single hub topic.
    #[must_use]
    pub fn topic(topic: Topic) -> Self {
        Self::topics([topic.as_str()])
    }

    /// Stop echoing the subscriber's own publications back to it.
    #[must_use]
    pub fn no_local(mut self) -> Self {
        self.no_local = true;
        self
    }

    /// Check if a delivery matches this filter for `subscriber`.
    #[must_use]
    pub fn matches(&self, delivery: &Delivery, subscriber: ClientId) -> bool {
        if self.no_local && delivery.origin == subscriber {
            return false;
        }
        self.topics.is_empty() || self.topics.iter().any(|t| *t == delivery.topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delivery(topic: &str, origin: ClientId) -> Delivery {
        Delivery {
            topic: topic.to_owned(),
            payload: Arc::from(&b"{}"[..]),
            origin,
        }
    }

    #[test]
    fn test_filter_all_accepts_unknown_channels() {
        let me = Uuid::new_v4();
        assert!(TopicFilter::all().matches(&delivery("/bogus", Uuid::new_v4()), me));
    }

    #[test]
    fn test_filter_by_topic() {
        let me = Uuid::new_v4();
        let filter = TopicFilter::topic(Topic::Error);
        assert!(filter.matches(&delivery("/error", Uuid::new_v4()), me));
        assert!(!filter.matches(&delivery("/network", Uuid::new_v4()), me));
    }

    #[test]
    fn test_hub_topics_filter() {
        let me = Uuid::new_v4();
        let filter = TopicFilter::hub_topics();
        assert_eq!(filter.topics.len(), 5);
        assert!(filter.matches(&delivery("/measurement", Uuid::new_v4()), me));
        assert!(!filter.matches(&delivery("/measurements", Uuid::new_v4()), me));
    }

    #[test]
    fn test_no_local_skips_own_messages() {
        let me = Uuid::new_v4();
        let filter = TopicFilter::all().no_local();
        assert!(!filter.matches(&delivery("/network", me), me));
        assert!(filter.matches(&delivery("/network", Uuid::new_v4()), me));
    }
}
