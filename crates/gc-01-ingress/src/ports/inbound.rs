//! # Driving Ports (Inbound API)
//!
//! The API the transport side drives with raw deliveries.

use async_trait::async_trait;
use shared_bus::TransportError;

use crate::service::{IngressOutcome, IngressStats};

/// Entry point for inbound hub traffic.
///
/// # Example
///
/// ```rust,ignore
/// use gc_01_ingress::ports::IngressApi;
///
/// async fn feed<A: IngressApi>(api: &A) {
///     let outcome = api.handle("/network", br#"{"mtype":0,"tag":1}"#).await?;
///     println!("{outcome:?}");
/// }
/// ```
#[async_trait]
pub trait IngressApi: Send + Sync {
    /// Validate, dispatch and answer one delivery.
    ///
    /// # Returns
    ///
    /// - `Ok(outcome)` - the delivery was classified; any resulting envelope
    ///   (error signal or handler response) has been published
    /// - `Err(TransportError)` - classification succeeded but publishing failed
    async fn handle(&self, topic: &str, raw: &[u8]) -> Result<IngressOutcome, TransportError>;

    /// Snapshot of the ingress counters.
    fn stats(&self) -> IngressStats;
}
