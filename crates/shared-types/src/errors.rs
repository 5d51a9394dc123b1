//! # Error Types
//!
//! Defines error types shared across the hub crates.

use thiserror::Error;

/// Errors from constructing entity value types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    /// Cube address outside `(0x00, 0xFF)`.
    #[error("Cube address 0x{0:02X} is out of the (0x00; 0xFF) range")]
    InvalidCubeId(u8),

    /// Side number outside `1..=6`.
    #[error("Side {0} is out of the [1; 6] range")]
    InvalidSide(u8),

    /// Color wider than 12 bits.
    #[error("Color 0x{0:X} does not fit in 3 hex digits")]
    InvalidColor(u16),
}

/// Errors from encoding an envelope for the wire.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// JSON encoding failed.
    #[error("Envelope encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// Payload did not encode to a flat key-value record.
    #[error("Envelope payload is not a key-value record")]
    NotARecord,
}
