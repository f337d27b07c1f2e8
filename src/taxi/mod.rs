//! The taxi grid-world environment
//!
//! A 5x5 grid with four landmark cells (R, G, B, Y). Each episode the taxi
//! spawns at a random cell, a passenger waits at a random landmark, and a
//! different landmark is the destination. The agent drives to the passenger,
//! picks them up, drives to the destination, and drops them off. Movement is
//! deterministic and constrained by a fixed set of vertical walls.

pub mod action;
pub mod encoding;
pub mod env;
pub mod grid;

pub use action::{ALL_ACTIONS, Action, NUM_ACTIONS};
pub use encoding::{NUM_STATES, decode_state, encode_state};
pub use env::{DEFAULT_STEP_BUDGET, EpisodeOutcome, Observation, StepOutcome, TaxiEnv};
pub use grid::{GRID_SIZE, LANDMARKS, NUM_LANDMARKS, PASSENGER_IN_TAXI};
