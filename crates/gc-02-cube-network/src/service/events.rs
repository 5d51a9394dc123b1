//! Envelopes emitted for each network event.

use shared_types::{CubeId, Envelope};

use crate::domain::{Cube, Flip, Reading};

/// A cube joined: `CubeJoined` then the configuration of its upward side.
pub fn joined(cube: &Cube) -> Vec<Envelope> {
    vec![
        Envelope::cube_joined(cube.id()),
        Envelope::side_config(cube.id(), cube.side(), cube.color()),
    ]
}

/// A cube left: `CubeDisconnected`.
pub fn left(id: CubeId) -> Vec<Envelope> {
    vec![Envelope::cube_disconnected(id)]
}

/// A cube flipped: `CubeFlipped` then the configuration of the new side.
pub fn flipped(flip: &Flip) -> Vec<Envelope> {
    vec![
        Envelope::cube_flipped(flip.cube_id, flip.old_side, flip.new_side),
        Envelope::side_config(flip.cube_id, flip.new_side, flip.color),
    ]
}

/// A sensor reading: `SensorData`.
pub fn measured(reading: Reading) -> Vec<Envelope> {
    vec![Envelope::sensor_data(reading.temp, reading.humid)]
}
