//! # Bus Ingress Adapter
//!
//! Pulls deliveries off a broker subscription and feeds them through the
//! ingress service one at a time.

use std::sync::Arc;

use shared_bus::{Subscription, TopicFilter, Transport};
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::ports::IngressApi;
use crate::service::IngressStats;

/// Drives an [`IngressApi`] from a broker subscription.
pub struct BusIngressAdapter<A> {
    api: Arc<A>,
    subscription: Subscription,
}

impl<A: IngressApi> BusIngressAdapter<A> {
    /// Subscribe `transport` to every channel and feed `api`.
    ///
    /// `transport` must be the same client the service replies through, so
    /// that the hub's own publications are not fed back into ingress.
    pub fn connect<T: Transport>(api: Arc<A>, transport: &T) -> Self {
        Self::new(api, transport.subscribe(TopicFilter::all().no_local()))
    }

    /// Feed `api` from an existing subscription.
    pub fn new(api: Arc<A>, subscription: Subscription) -> Self {
        Self { api, subscription }
    }

    /// Process deliveries until `shutdown` flips to `true` or the broker
    /// goes away.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> IngressStats {
        info!("Ingress adapter started");

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Ingress adapter shutdown signal received");
                        break;
                    }
                }
                delivery = self.subscription.recv() => {
                    let Some(delivery) = delivery else {
                        info!("Broker closed, ingress adapter stopping");
                        break;
                    };
                    match self.api.handle(&delivery.topic, &delivery.payload).await {
                        Ok(outcome) => {
                            debug!(topic = %delivery.topic, origin = %delivery.origin, ?outcome, "Delivery processed");
                        }
                        Err(e) => {
                            error!(topic = %delivery.topic, error = %e, "Failed to publish ingress reply");
                        }
                    }
                }
            }
        }

        let stats = self.api.stats();
        info!(
            received = stats.received,
            accepted = stats.accepted,
            rejected = stats.rejected,
            "Ingress adapter stopped"
        );
        stats
    }
}
