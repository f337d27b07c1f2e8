//! Tabular Q-learning for the taxi grid world
//!
//! This crate provides:
//! - A deterministic 5x5 pickup-and-delivery environment with walls and
//!   four landmark cells
//! - A dense 500-state Q-table and epsilon-greedy learning agent
//! - A training pipeline with composable observers for logging and export
//! - Greedy-policy evaluation and rollout tooling

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod taxi;

pub use error::{Error, Result};
pub use pipeline::{TrainingConfig, TrainingPipeline, TrainingResult};
pub use q_learning::{QLearningAgent, QTable};
pub use taxi::{Action, EpisodeOutcome, Observation, TaxiEnv, decode_state, encode_state};
