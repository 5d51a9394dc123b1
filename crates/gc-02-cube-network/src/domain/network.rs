//! # Cube Network
//!
//! In-memory population of cubes bounded by a capacity.
//!
//! ## Invariants
//!
//! - `len() <= capacity()` at all times
//! - member ids are distinct and inside `(0x00, 0xFF)`
//! - `is_full` / `is_empty` are derived, never stored
//!
//! Every operation either completes or leaves the population untouched.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use shared_types::{CubeId, Side};

use super::cube::{Cube, Flip};
use super::errors::NetworkError;

/// Sensor readings produced by the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    /// Degrees Celsius.
    pub temp: i16,
    /// Relative humidity, percent.
    pub humid: u8,
}

impl Reading {
    /// Temperature range of simulated readings.
    pub const TEMP_RANGE: std::ops::RangeInclusive<i16> = 15..=30;
    /// Humidity range of simulated readings.
    pub const HUMID_RANGE: std::ops::RangeInclusive<u8> = 30..=70;
}

/// The simulated device population.
#[derive(Debug)]
pub struct CubeNetwork {
    cubes: BTreeMap<CubeId, Cube>,
    capacity: usize,
    rng: StdRng,
}

impl CubeNetwork {
    /// Empty network seeded from OS entropy.
    pub fn new(capacity: usize) -> Self {
        Self::with_rng(capacity, StdRng::from_entropy())
    }

    /// Empty network with reproducible randomness.
    pub fn with_seed(capacity: usize, seed: u64) -> Self {
        Self::with_rng(capacity, StdRng::seed_from_u64(seed))
    }

    fn with_rng(capacity: usize, rng: StdRng) -> Self {
        Self {
            cubes: BTreeMap::new(),
            capacity,
            rng,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_full(&self) -> bool {
        self.cubes.len() >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    /// Member addresses in ascending order.
    pub fn addresses(&self) -> Vec<CubeId> {
        self.cubes.keys().copied().collect()
    }

    pub fn get_cube(&self, id: CubeId) -> Option<&Cube> {
        self.cubes.get(&id)
    }

    /// Members in ascending address order.
    pub fn cubes(&self) -> impl Iterator<Item = &Cube> {
        self.cubes.values()
    }

    /// Add a cube at `id`, or at a random free address if `None`.
    ///
    /// # Errors
    ///
    /// - `InvalidAddress` if `id` is `0x00` or `0xFF`
    /// - `AddressInUse` if `id` is taken
    /// - `NetworkFull` if at capacity or no address is free
    pub fn join(&mut self, id: Option<u8>) -> Result<&Cube, NetworkError> {
        let id = match id {
            Some(raw) => {
                let id = CubeId::new(raw).map_err(|_| NetworkError::InvalidAddress(raw))?;
                if self.cubes.contains_key(&id) {
                    return Err(NetworkError::AddressInUse(id));
                }
                if self.is_full() {
                    return Err(NetworkError::NetworkFull);
                }
                id
            }
            None => self.allocate_id()?,
        };

        let cube = Cube::spawn(id, &mut self.rng);
        Ok(self.cubes.entry(id).or_insert(cube))
    }

    /// Remove the cube at `id`, or a random member if `None`.
    ///
    /// # Errors
    ///
    /// - `NetworkEmpty` if there is nothing to remove
    /// - `AddressNotFound` if `id` is not a member
    pub fn exit(&mut self, id: Option<u8>) -> Result<CubeId, NetworkError> {
        if self.is_empty() {
            return Err(NetworkError::NetworkEmpty);
        }

        let id = match id {
            Some(raw) => CubeId::new(raw)
                .ok()
                .filter(|id| self.cubes.contains_key(id))
                .ok_or(NetworkError::AddressNotFound(raw))?,
            None => self.random_member().ok_or(NetworkError::NetworkEmpty)?,
        };

        self.cubes.remove(&id);
        Ok(id)
    }

    /// Flip the cube at `id`.
    ///
    /// # Errors
    ///
    /// `AddressNotFound` if `id` is not a member.
    pub fn flip(&mut self, id: CubeId, side: Option<Side>) -> Result<Flip, NetworkError> {
        let cube = self
            .cubes
            .get_mut(&id)
            .ok_or(NetworkError::AddressNotFound(id.as_u8()))?;
        Ok(cube.flip(side, &mut self.rng))
    }

    /// Uniformly random member address.
    pub fn random_member(&mut self) -> Option<CubeId> {
        self.cubes.keys().copied().choose(&mut self.rng)
    }

    /// A fresh sensor reading.
    pub fn measure(&mut self) -> Reading {
        Reading {
            temp: self.rng.gen_range(Reading::TEMP_RANGE),
            humid: self.rng.gen_range(Reading::HUMID_RANGE),
        }
    }

    fn allocate_id(&mut self) -> Result<CubeId, NetworkError> {
        if self.is_full() {
            return Err(NetworkError::NetworkFull);
        }
        let cubes = &self.cubes;
        (CubeId::MIN..=CubeId::MAX)
            .filter_map(|raw| CubeId::new(raw).ok())
            .filter(|id| !cubes.contains_key(id))
            .choose(&mut self.rng)
            .ok_or(NetworkError::NetworkFull)
    }
}
