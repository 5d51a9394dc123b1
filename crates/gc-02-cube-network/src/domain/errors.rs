//! Domain Errors for the Cube Network

use shared_types::CubeId;
use thiserror::Error;

/// Precondition violations on network operations.
///
/// Never corrected silently; the caller decides what to do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// Address outside `(0x00, 0xFF)`.
    #[error("address 0x{0:02X} is out of the (0x00, 0xFF) range")]
    InvalidAddress(u8),

    /// Another cube already holds this address.
    #[error("address {0} is already in use")]
    AddressInUse(CubeId),

    /// No cube holds this address.
    #[error("address 0x{0:02X} is not in use")]
    AddressNotFound(u8),

    /// Capacity reached or the address space is exhausted.
    #[error("network is full")]
    NetworkFull,

    /// No cubes to remove.
    #[error("network is empty")]
    NetworkEmpty,
}
