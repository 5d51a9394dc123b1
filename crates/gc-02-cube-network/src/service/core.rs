use parking_lot::Mutex;
use shared_bus::{Transport, TransportError};
use shared_types::{CubeId, Envelope, Side};
use thiserror::Error;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info};

use super::events;
use crate::domain::{Cube, CubeNetwork, Flip, NetworkError, Reading};

/// Errors from service operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The network refused the operation; nothing was published.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The network changed but the resulting envelopes could not be published.
    #[error("failed to publish network event: {0}")]
    Transport(#[from] TransportError),
}

/// Cube network service.
///
/// Each join/exit/flip/measure holds `publishing` from its mutation until
/// its last envelope is published, so envelopes leave in mutation order.
/// `network` is never held across an `.await`.
pub struct CubeNetworkService<T> {
    network: Mutex<CubeNetwork>,
    publishing: AsyncMutex<()>,
    transport: T,
}

impl<T: Transport> CubeNetworkService<T> {
    /// Wrap `network`, publishing through `transport`.
    pub fn new(network: CubeNetwork, transport: T) -> Self {
        Self {
            network: Mutex::new(network),
            publishing: AsyncMutex::new(()),
            transport,
        }
    }

    /// Join a cube and announce it.
    pub async fn join(&self, id: Option<u8>) -> Result<CubeId, ServiceError> {
        let _publishing = self.publishing.lock().await;
        let (cube_id, envelopes) = {
            let mut network = self.network.lock();
            let cube = network.join(id)?;
            (cube.id(), events::joined(cube))
        };
        info!(cube_id = %cube_id, "Cube joined");
        self.publish_all(&envelopes).await?;
        Ok(cube_id)
    }

    /// Remove a cube and announce it.
    pub async fn exit(&self, id: Option<u8>) -> Result<CubeId, ServiceError> {
        let _publishing = self.publishing.lock().await;
        let cube_id = self.network.lock().exit(id)?;
        info!(cube_id = %cube_id, "Cube left");
        self.publish_all(&events::left(cube_id)).await?;
        Ok(cube_id)
    }

    /// Flip a cube and announce its new side.
    pub async fn flip(&self, id: CubeId, side: Option<Side>) -> Result<Flip, ServiceError> {
        let _publishing = self.publishing.lock().await;
        let flip = self.network.lock().flip(id, side)?;
        self.announce_flip(flip).await
    }

    /// Flip a random member.
    pub async fn flip_random(&self) -> Result<Flip, ServiceError> {
        let _publishing = self.publishing.lock().await;
        let flip = {
            let mut network = self.network.lock();
            let id = network.random_member().ok_or(NetworkError::NetworkEmpty)?;
            network.flip(id, None)?
        };
        self.announce_flip(flip).await
    }

    /// Take and publish a sensor reading.
    pub async fn measure(&self) -> Result<Reading, ServiceError> {
        let _publishing = self.publishing.lock().await;
        let reading = self.network.lock().measure();
        debug!(temp = reading.temp, humid = reading.humid, "Sensor reading");
        self.publish_all(&events::measured(reading)).await?;
        Ok(reading)
    }

    pub fn len(&self) -> usize {
        self.network.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.network.lock().is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.network.lock().is_full()
    }

    pub fn capacity(&self) -> usize {
        self.network.lock().capacity()
    }

    pub fn addresses(&self) -> Vec<CubeId> {
        self.network.lock().addresses()
    }

    /// Copy of the cube at `id`.
    pub fn get_cube(&self, id: CubeId) -> Option<Cube> {
        self.network.lock().get_cube(id).cloned()
    }

    async fn announce_flip(&self, flip: Flip) -> Result<Flip, ServiceError> {
        debug!(
            cube_id = %flip.cube_id,
            old_side = %flip.old_side,
            new_side = %flip.new_side,
            color = %flip.color,
            "Cube flipped"
        );
        self.publish_all(&events::flipped(&flip)).await?;
        Ok(flip)
    }

    async fn publish_all(&self, envelopes: &[Envelope]) -> Result<(), TransportError> {
        for envelope in envelopes {
            self.transport.publish_envelope(envelope).await?;
        }
        Ok(())
    }
}
