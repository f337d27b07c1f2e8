//! Observer port - abstraction for training observation and data collection
//!
//! Observers can be composed to collect different kinds of data during
//! training: progress bars, step logs, metrics, JSONL export. The pipeline
//! calls them in a fixed order:
//!
//! 1. `on_training_start(total_episodes)` - once at the beginning
//! 2. For each episode:
//!    - `on_episode_start(episode)`
//!    - `on_step(record)` - after every TD update
//!    - `on_episode_end(summary)`
//! 3. `on_training_end()` - once at the end

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    taxi::{Action, EpisodeOutcome, Observation},
};

/// Everything produced by one training step, captured after the TD update
///
/// Carries the full (state, action, reward, next state, old Q, new Q)
/// quadruple-plus so consumers never recompute any of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Episode index (0-based)
    pub episode: usize,
    /// Step index within the episode (0-based)
    pub step: usize,
    /// Encoded state the action was selected in
    pub state: usize,
    pub action: Action,
    pub reward: f64,
    /// Encoded state the step produced
    pub next_state: usize,
    /// Q[state][action] before the update
    pub old_q: f64,
    /// Q[state][action] after the update
    pub new_q: f64,
    /// Observation after the step was applied
    pub observation: Observation,
}

/// Totals for one finished episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub episode: usize,
    pub outcome: EpisodeOutcome,
    pub total_reward: f64,
    pub steps: usize,
}

/// Observer trait for monitoring training
///
/// All methods default to no-ops so implementations only override the events
/// they care about.
pub trait Observer: Send {
    /// Called once before the first episode.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts, after the environment reset.
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called after every step and its TD update.
    fn on_step(&mut self, _record: &StepRecord) -> Result<()> {
        Ok(())
    }

    /// Called when an episode terminates.
    fn on_episode_end(&mut self, _summary: &EpisodeSummary) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
