//! Greedy-policy evaluation
//!
//! Rolls out episodes that always take the table's greedy action (no
//! exploration, no learning) and summarizes how the learned policy performs.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::{
    Error, Result,
    q_learning::QTable,
    taxi::{EpisodeOutcome, TaxiEnv},
};

/// Evaluation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Number of greedy episodes to roll out
    pub num_episodes: usize,

    /// Per-episode step budget
    pub step_budget: usize,

    /// Random seed for the start-state distribution
    pub seed: Option<u64>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            num_episodes: 100,
            step_budget: 200,
            seed: None,
        }
    }
}

/// Aggregate statistics over the evaluated episodes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub episodes: usize,
    pub solved: usize,
    pub solve_rate: f64,
    pub mean_reward: f64,
    pub std_dev_reward: f64,
    pub min_reward: f64,
    pub max_reward: f64,
    pub mean_steps: f64,
}

/// Roll out greedy episodes and summarize the rewards.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`] for a zero episode count or step
/// budget.
pub fn evaluate_greedy(q_table: &QTable, config: &EvaluationConfig) -> Result<EvaluationSummary> {
    if config.num_episodes == 0 {
        return Err(Error::InvalidConfiguration {
            message: "evaluation episode count must be positive".to_string(),
        });
    }
    if config.step_budget == 0 {
        return Err(Error::InvalidConfiguration {
            message: "evaluation step budget must be positive".to_string(),
        });
    }

    let mut env = TaxiEnv::new(config.step_budget);
    if let Some(seed) = config.seed {
        env = env.with_seed(seed);
    }

    let mut rewards = Vec::with_capacity(config.num_episodes);
    let mut steps = Vec::with_capacity(config.num_episodes);
    let mut solved = 0;

    for _ in 0..config.num_episodes {
        env.reset();
        let mut total_reward = 0.0;
        loop {
            let action = q_table.greedy_action(env.encoded_state());
            let outcome = env.step(action)?;
            total_reward += outcome.reward;
            if outcome.terminated {
                break;
            }
        }
        if env.outcome() == Some(EpisodeOutcome::Solved) {
            solved += 1;
        }
        rewards.push(total_reward);
        steps.push(env.step_count() as f64);
    }

    Ok(EvaluationSummary {
        episodes: config.num_episodes,
        solved,
        solve_rate: solved as f64 / config.num_episodes as f64,
        mean_reward: rewards.as_slice().mean(),
        std_dev_reward: if rewards.len() > 1 {
            rewards.as_slice().std_dev()
        } else {
            0.0
        },
        min_reward: rewards.as_slice().min(),
        max_reward: rewards.as_slice().max(),
        mean_steps: steps.as_slice().mean(),
    })
}
