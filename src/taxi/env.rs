//! Episode simulation: reset, step, and read accessors
//!
//! `TaxiEnv` owns all per-episode state. Collaborators (loggers, renderers,
//! trainers) read it through accessors; the environment never calls out to
//! them.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::{
    action::Action,
    encoding::encode_state,
    grid::{self, GRID_SIZE, NUM_LANDMARKS, PASSENGER_IN_TAXI},
};
use crate::error::{Error, Result};

/// Cost of one timestep
const STEP_REWARD: f64 = -1.0;
/// Penalty for an illegal pickup or dropoff
const ILLEGAL_REWARD: f64 = -10.0;
/// Reward for delivering the passenger to the destination
const DROPOFF_REWARD: f64 = 20.0;

/// Default per-episode step budget
pub const DEFAULT_STEP_BUDGET: usize = 200;

/// The externally visible projection of episode state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub taxi_row: usize,
    pub taxi_col: usize,
    /// Landmark index of the waiting passenger, or 4 when riding in the taxi
    pub passenger: usize,
    /// Landmark index of the destination
    pub destination: usize,
}

/// Reward and termination flag produced by a single step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub reward: f64,
    pub terminated: bool,
}

/// How a finished episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeOutcome {
    /// Passenger delivered to the destination
    Solved,
    /// Step budget exhausted before delivery
    TimedOut,
}

impl EpisodeOutcome {
    pub fn label(self) -> &'static str {
        match self {
            EpisodeOutcome::Solved => "solved",
            EpisodeOutcome::TimedOut => "timed out",
        }
    }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// The taxi grid-world environment
///
/// Always holds a live or just-finished episode; `new` performs an initial
/// `reset`, and each subsequent `reset` discards the previous episode.
#[derive(Debug, Clone)]
pub struct TaxiEnv {
    taxi_row: usize,
    taxi_col: usize,
    passenger: usize,
    destination: usize,
    step_count: usize,
    step_budget: usize,
    terminated: bool,
    solved: bool,
    last_reward: f64,
    rng: StdRng,
}

impl TaxiEnv {
    /// Create an environment with the given per-episode step budget and a
    /// fresh episode already in place.
    pub fn new(step_budget: usize) -> Self {
        let mut env = Self {
            taxi_row: 0,
            taxi_col: 0,
            passenger: 0,
            destination: 1,
            step_count: 0,
            step_budget,
            terminated: false,
            solved: false,
            last_reward: 0.0,
            rng: build_rng(None),
        };
        env.reset();
        env
    }

    /// Reseed the RNG and start a deterministic first episode from it.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.reset();
        self
    }

    /// Start a new episode: random taxi cell, random waiting passenger, and
    /// a destination resampled until it differs from the passenger landmark.
    pub fn reset(&mut self) {
        self.step_count = 0;
        self.terminated = false;
        self.solved = false;
        self.last_reward = 0.0;
        self.taxi_row = self.rng.random_range(0..GRID_SIZE);
        self.taxi_col = self.rng.random_range(0..GRID_SIZE);
        self.passenger = self.rng.random_range(0..NUM_LANDMARKS);
        self.destination = self.rng.random_range(0..NUM_LANDMARKS);
        while self.destination == self.passenger {
            self.destination = self.rng.random_range(0..NUM_LANDMARKS);
        }
    }

    /// Start an episode from an explicit observation, for scripted scenarios.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when a component is out of
    /// range or a waiting passenger shares the destination landmark.
    pub fn reset_to(&mut self, observation: Observation) -> Result<()> {
        let Observation {
            taxi_row,
            taxi_col,
            passenger,
            destination,
        } = observation;
        if taxi_row >= GRID_SIZE || taxi_col >= GRID_SIZE {
            return Err(Error::InvalidConfiguration {
                message: format!("taxi cell ({taxi_row}, {taxi_col}) is outside the grid"),
            });
        }
        if passenger > PASSENGER_IN_TAXI {
            return Err(Error::InvalidConfiguration {
                message: format!("passenger index {passenger} is out of range"),
            });
        }
        if destination >= NUM_LANDMARKS {
            return Err(Error::InvalidConfiguration {
                message: format!("destination index {destination} is out of range"),
            });
        }
        if passenger < PASSENGER_IN_TAXI && passenger == destination {
            return Err(Error::InvalidConfiguration {
                message: format!("waiting passenger and destination share landmark {passenger}"),
            });
        }
        self.step_count = 0;
        self.terminated = false;
        self.solved = false;
        self.last_reward = 0.0;
        self.taxi_row = taxi_row;
        self.taxi_col = taxi_col;
        self.passenger = passenger;
        self.destination = destination;
        Ok(())
    }

    /// Apply one action and return its reward and termination flag.
    ///
    /// Movement clamps at borders and wall segments. Pickup and dropoff at
    /// the wrong cell (or in the wrong carrying state) cost -10 and change
    /// nothing. Reaching the step budget forces termination without erasing
    /// the reward computed this step.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EpisodeOver`] when the episode has already ended.
    pub fn step(&mut self, action: Action) -> Result<StepOutcome> {
        if self.terminated {
            return Err(Error::EpisodeOver);
        }

        let mut reward = STEP_REWARD;
        let mut terminated = false;

        match action {
            Action::Down => {
                if self.taxi_row + 1 < GRID_SIZE {
                    self.taxi_row += 1;
                }
            }
            Action::Up => {
                if self.taxi_row > 0 {
                    self.taxi_row -= 1;
                }
            }
            Action::Right => {
                if self.taxi_col + 1 < GRID_SIZE && !grid::wall_east(self.taxi_row, self.taxi_col) {
                    self.taxi_col += 1;
                }
            }
            Action::Left => {
                if self.taxi_col > 0 && !grid::wall_east(self.taxi_row, self.taxi_col - 1) {
                    self.taxi_col -= 1;
                }
            }
            Action::Pickup => {
                if self.passenger < PASSENGER_IN_TAXI
                    && grid::landmark(self.passenger) == (self.taxi_row, self.taxi_col)
                {
                    self.passenger = PASSENGER_IN_TAXI;
                } else {
                    reward = ILLEGAL_REWARD;
                }
            }
            Action::Dropoff => {
                if self.passenger == PASSENGER_IN_TAXI
                    && grid::landmark(self.destination) == (self.taxi_row, self.taxi_col)
                {
                    reward = DROPOFF_REWARD;
                    terminated = true;
                    self.solved = true;
                    // Passenger comes to rest at the destination landmark.
                    self.passenger = self.destination;
                } else {
                    reward = ILLEGAL_REWARD;
                }
            }
        }

        self.step_count += 1;
        if self.step_count >= self.step_budget {
            terminated = true;
        }

        self.last_reward = reward;
        self.terminated = terminated;
        Ok(StepOutcome { reward, terminated })
    }

    pub fn taxi_row(&self) -> usize {
        self.taxi_row
    }

    pub fn taxi_col(&self) -> usize {
        self.taxi_col
    }

    /// Landmark index of the waiting passenger, or 4 when in the taxi
    pub fn passenger(&self) -> usize {
        self.passenger
    }

    /// Landmark index of the destination
    pub fn destination(&self) -> usize {
        self.destination
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn step_budget(&self) -> usize {
        self.step_budget
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Reward produced by the most recent step
    pub fn last_reward(&self) -> f64 {
        self.last_reward
    }

    /// The externally visible 4-tuple projection of the episode state
    pub fn observation(&self) -> Observation {
        Observation {
            taxi_row: self.taxi_row,
            taxi_col: self.taxi_col,
            passenger: self.passenger,
            destination: self.destination,
        }
    }

    /// Table index of the current observation
    pub fn encoded_state(&self) -> usize {
        encode_state(self.taxi_row, self.taxi_col, self.passenger, self.destination)
    }

    /// How the episode ended, or `None` while it is still running
    pub fn outcome(&self) -> Option<EpisodeOutcome> {
        if !self.terminated {
            None
        } else if self.solved {
            Some(EpisodeOutcome::Solved)
        } else {
            Some(EpisodeOutcome::TimedOut)
        }
    }
}
