//! Epsilon-greedy Q-learning agent

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    q_learning::q_table::{QTable, TdUpdate},
    taxi::{ALL_ACTIONS, Action, NUM_ACTIONS},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct AgentState {
    pub q_table: QTable,
    pub epsilon: f64,
    pub rng_seed: Option<u64>,
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Q-learning agent (off-policy TD control)
///
/// Owns the Q-table and the exploration RNG. Action selection mixes uniform
/// exploration (probability epsilon) with greedy exploitation of the current
/// table.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    epsilon: f64,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl QLearningAgent {
    /// Create an agent with a zero-initialized table.
    ///
    /// # Arguments
    ///
    /// * `learning_rate` - alpha parameter (0.0 to 1.0)
    /// * `discount_factor` - gamma parameter (0.0 to 1.0)
    /// * `epsilon` - exploration rate (0.0 to 1.0)
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ResourceExhausted`] if the table allocation
    /// fails.
    pub fn new(learning_rate: f64, discount_factor: f64, epsilon: f64) -> Result<Self> {
        Ok(Self {
            q_table: QTable::new(learning_rate, discount_factor)?,
            epsilon,
            rng: build_rng(None),
            rng_seed: None,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    /// Epsilon-greedy action selection over the state's six Q-values
    pub fn select_action(&mut self, state: usize) -> Action {
        if self.rng.random::<f64>() < self.epsilon {
            // Explore: uniformly random action
            ALL_ACTIONS[self.rng.random_range(0..NUM_ACTIONS)]
        } else {
            // Exploit: greedy action, lowest index on ties
            self.q_table.greedy_action(state)
        }
    }

    /// Apply the TD update for one observed transition.
    pub fn observe(
        &mut self,
        state: usize,
        action: Action,
        reward: f64,
        next_state: usize,
        terminated: bool,
    ) -> TdUpdate {
        self.q_table
            .q_learning_update(state, action, reward, next_state, terminated)
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Read access to the learned table
    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub(crate) fn export_state(&self) -> AgentState {
        AgentState {
            q_table: self.q_table.clone(),
            epsilon: self.epsilon,
            rng_seed: self.rng_seed,
        }
    }

    pub(crate) fn from_state(state: AgentState) -> Self {
        Self {
            q_table: state.q_table,
            epsilon: state.epsilon,
            rng: build_rng(state.rng_seed),
            rng_seed: state.rng_seed,
        }
    }
}
