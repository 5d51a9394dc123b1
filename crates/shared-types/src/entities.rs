//! # Domain Entities
//!
//! Value types shared by the envelope model and the cube network.

use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::errors::EntityError;

/// 8-bit cube address.
///
/// `0x00` and `0xFF` are reserved, so a valid id lies in the open range
/// `(0x00, 0xFF)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CubeId(u8);

impl CubeId {
    /// Smallest assignable address.
    pub const MIN: u8 = 0x01;
    /// Largest assignable address.
    pub const MAX: u8 = 0xFE;
    /// Number of assignable addresses.
    pub const SPACE: usize = (Self::MAX - Self::MIN) as usize + 1;

    /// Validate and wrap a raw address.
    pub fn new(raw: u8) -> Result<Self, EntityError> {
        if (Self::MIN..=Self::MAX).contains(&raw) {
            Ok(Self(raw))
        } else {
            Err(EntityError::InvalidCubeId(raw))
        }
    }

    /// Raw address.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for CubeId {
    type Error = EntityError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl fmt::Display for CubeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

/// Face of a cube pointing up, 1 through 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Side(u8);

impl Side {
    /// Lowest side number.
    pub const MIN: u8 = 1;
    /// Highest side number.
    pub const MAX: u8 = 6;
    /// Every side, in order.
    pub const ALL: [Self; 6] = [Self(1), Self(2), Self(3), Self(4), Self(5), Self(6)];

    /// Validate and wrap a side number.
    pub fn new(raw: u8) -> Result<Self, EntityError> {
        if (Self::MIN..=Self::MAX).contains(&raw) {
            Ok(Self(raw))
        } else {
            Err(EntityError::InvalidSide(raw))
        }
    }

    /// Raw side number.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display color of a side, 12-bit RGB rendered as `#RGB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SideColor(u16);

impl SideColor {
    /// Largest encodable color.
    pub const MAX: u16 = 0x0FFF;

    /// Validate and wrap a 12-bit color.
    pub fn new(raw: u16) -> Result<Self, EntityError> {
        if raw <= Self::MAX {
            Ok(Self(raw))
        } else {
            Err(EntityError::InvalidColor(raw))
        }
    }

    /// Keep the low 12 bits of `raw`.
    #[must_use]
    pub const fn from_masked(raw: u16) -> Self {
        Self(raw & Self::MAX)
    }

    /// Raw 12-bit value.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for SideColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:03x}", self.0)
    }
}

impl Serialize for SideColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Shared, lock-free handle on the sensor data period in milliseconds.
///
/// Written by the period request handler, read by whatever produces
/// sensor readings.
#[derive(Debug, Clone)]
pub struct SensorPeriod(Arc<AtomicU64>);

impl SensorPeriod {
    /// Period used when nothing else is configured.
    pub const DEFAULT_MS: u64 = 5_000;

    /// Create a handle holding `period_ms`.
    #[must_use]
    pub fn new(period_ms: u64) -> Self {
        Self(Arc::new(AtomicU64::new(period_ms)))
    }

    /// Current period in milliseconds.
    #[must_use]
    pub fn get_ms(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    /// Replace the period.
    pub fn set_ms(&self, period_ms: u64) {
        self.0.store(period_ms, Ordering::Relaxed);
    }
}

impl Default for SensorPeriod {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MS)
    }
}

/// Wall-clock time as fractional UNIX seconds.
#[must_use]
pub fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}
