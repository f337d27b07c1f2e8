//! Integer encoding of the observation tuple
//!
//! The four observation components pack into a single table index via a
//! mixed-radix scheme: `((row * 5 + col) * 5 + passenger) * 4 + destination`.

use super::grid::{GRID_SIZE, NUM_LANDMARKS, PASSENGER_IN_TAXI};

/// Total number of encodable states: 5 x 5 x 5 x 4
pub const NUM_STATES: usize = GRID_SIZE * GRID_SIZE * (PASSENGER_IN_TAXI + 1) * NUM_LANDMARKS;

/// Encode an observation tuple as a table index in [0, 500).
///
/// Injective over row, col in [0, 4], passenger in [0, 4] (4 = in taxi),
/// destination in [0, 3].
pub fn encode_state(row: usize, col: usize, passenger: usize, destination: usize) -> usize {
    debug_assert!(row < GRID_SIZE && col < GRID_SIZE);
    debug_assert!(passenger <= PASSENGER_IN_TAXI);
    debug_assert!(destination < NUM_LANDMARKS);
    ((row * GRID_SIZE + col) * (PASSENGER_IN_TAXI + 1) + passenger) * NUM_LANDMARKS + destination
}

/// Recover the (row, col, passenger, destination) tuple from a table index.
pub fn decode_state(state: usize) -> (usize, usize, usize, usize) {
    debug_assert!(state < NUM_STATES);
    let destination = state % NUM_LANDMARKS;
    let rest = state / NUM_LANDMARKS;
    let passenger = rest % (PASSENGER_IN_TAXI + 1);
    let rest = rest / (PASSENGER_IN_TAXI + 1);
    let col = rest % GRID_SIZE;
    let row = rest / GRID_SIZE;
    (row, col, passenger, destination)
}
