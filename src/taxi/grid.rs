//! Grid geometry: dimensions, landmark cells, and wall segments

/// Side length of the square grid
pub const GRID_SIZE: usize = 5;

/// Number of landmark cells
pub const NUM_LANDMARKS: usize = 4;

/// Passenger index meaning "riding in the taxi" rather than waiting at a landmark
pub const PASSENGER_IN_TAXI: usize = 4;

/// Landmark cells R, G, B, Y as (row, col)
pub const LANDMARKS: [(usize, usize); NUM_LANDMARKS] = [(0, 0), (0, 4), (4, 0), (4, 3)];

/// Vertical wall segments. `VERTICAL_WALLS[row][col]` is true when a wall
/// blocks movement between (row, col) and (row, col + 1) in both directions.
const VERTICAL_WALLS: [[bool; GRID_SIZE]; GRID_SIZE] = [
    [false, true, false, false, false],
    [false, true, false, false, false],
    [false, false, false, false, false],
    [false, true, false, true, false],
    [false, true, false, true, false],
];

/// Is there a wall on the east edge of (row, col)?
pub fn wall_east(row: usize, col: usize) -> bool {
    VERTICAL_WALLS[row][col]
}

/// Landmark coordinates for a waiting-passenger or destination index.
///
/// Panics if `index >= NUM_LANDMARKS`; callers hold the [0, 4) invariant.
pub fn landmark(index: usize) -> (usize, usize) {
    LANDMARKS[index]
}
