//! Training pipeline for the Q-learning agent

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    pipeline::history::RewardHistory,
    ports::{EpisodeSummary, Observer, StepRecord},
    q_learning::QLearningAgent,
    taxi::{EpisodeOutcome, TaxiEnv},
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub num_episodes: usize,

    /// Learning rate alpha
    pub learning_rate: f64,

    /// Discount factor gamma
    pub discount_factor: f64,

    /// Exploration rate epsilon
    pub epsilon: f64,

    /// Per-episode step budget
    pub step_budget: usize,

    /// Random seed (agent uses it directly, environment uses seed + 1)
    pub seed: Option<u64>,

    /// Capacity of the batched reward history
    pub history_capacity: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_episodes: 5000,
            learning_rate: 0.1,
            discount_factor: 0.99,
            epsilon: 0.1,
            step_budget: 200,
            seed: None,
            history_capacity: 1280,
        }
    }
}

impl TrainingConfig {
    /// Episodes averaged into each reward-history point
    pub fn episodes_per_point(&self) -> usize {
        if self.history_capacity == 0 {
            1
        } else {
            (self.num_episodes / self.history_capacity).max(1)
        }
    }

    /// Build the environment this configuration describes.
    pub fn build_env(&self) -> TaxiEnv {
        let env = TaxiEnv::new(self.step_budget);
        match self.seed {
            Some(seed) => env.with_seed(seed.wrapping_add(1)),
            None => env,
        }
    }

    /// Build a fresh agent for this configuration.
    pub fn build_agent(&self) -> Result<QLearningAgent> {
        let agent = QLearningAgent::new(self.learning_rate, self.discount_factor, self.epsilon)?;
        Ok(match self.seed {
            Some(seed) => agent.with_seed(seed),
            None => agent,
        })
    }

    fn validate(&self) -> Result<()> {
        if self.num_episodes == 0 {
            return Err(Error::InvalidConfiguration {
                message: "episode count must be positive".to_string(),
            });
        }
        if self.step_budget == 0 {
            return Err(Error::InvalidConfiguration {
                message: "step budget must be positive".to_string(),
            });
        }
        for (name, value) in [
            ("learning rate", self.learning_rate),
            ("discount factor", self.discount_factor),
            ("epsilon", self.epsilon),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} {value} must lie in [0, 1]"),
                });
            }
        }
        Ok(())
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Episodes played
    pub total_episodes: usize,

    /// Steps taken across all episodes
    pub total_steps: usize,

    /// Episodes that ended with a delivery
    pub solved: usize,

    /// Episodes cut off by the step budget
    pub timed_out: usize,

    /// Fraction of episodes solved
    pub solve_rate: f64,

    /// Mean total reward per episode
    pub mean_reward: f64,

    /// Batched reward history for plotting
    pub reward_history: Vec<f64>,
}

impl TrainingResult {
    pub fn new(
        total_episodes: usize,
        total_steps: usize,
        solved: usize,
        timed_out: usize,
        reward_sum: f64,
        reward_history: Vec<f64>,
    ) -> Self {
        let solve_rate = if total_episodes > 0 {
            solved as f64 / total_episodes as f64
        } else {
            0.0
        };
        let mean_reward = if total_episodes > 0 {
            reward_sum / total_episodes as f64
        } else {
            0.0
        };
        Self {
            total_episodes,
            total_steps,
            solved,
            timed_out,
            solve_rate,
            mean_reward,
            reward_history,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }

    /// Write the batched reward history as CSV for plotting collaborators.
    pub fn save_history_csv<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["point", "mean_reward"])?;
        for (point, mean_reward) in self.reward_history.iter().enumerate() {
            writer.write_record([point.to_string(), format!("{mean_reward:.4}")])?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Episodic Q-learning training loop
///
/// Runs the configured number of episodes to completion; there is no early
/// stopping. Observers receive every step record and episode summary.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run training with the given agent and environment
    pub fn run(&mut self, agent: &mut QLearningAgent, env: &mut TaxiEnv) -> Result<TrainingResult> {
        self.config.validate()?;

        let mut history =
            RewardHistory::new(self.config.history_capacity, self.config.episodes_per_point());
        let mut total_steps = 0;
        let mut reward_sum = 0.0;
        let mut solved = 0;
        let mut timed_out = 0;

        for observer in &mut self.observers {
            observer.on_training_start(self.config.num_episodes)?;
        }

        for episode in 0..self.config.num_episodes {
            env.reset();
            for observer in &mut self.observers {
                observer.on_episode_start(episode)?;
            }

            let mut state = env.encoded_state();
            let mut total_reward = 0.0;
            let mut steps = 0;

            loop {
                let action = agent.select_action(state);
                let outcome = env.step(action)?;
                let next_state = env.encoded_state();

                // The terminal flag covers budget truncation too; both
                // suppress the bootstrap term identically.
                let update =
                    agent.observe(state, action, outcome.reward, next_state, outcome.terminated);

                let record = StepRecord {
                    episode,
                    step: steps,
                    state,
                    action,
                    reward: outcome.reward,
                    next_state,
                    old_q: update.old_q,
                    new_q: update.new_q,
                    observation: env.observation(),
                };
                for observer in &mut self.observers {
                    observer.on_step(&record)?;
                }

                total_reward += outcome.reward;
                steps += 1;

                if outcome.terminated {
                    break;
                }
                state = next_state;
            }

            let outcome = env.outcome().unwrap_or(EpisodeOutcome::TimedOut);
            match outcome {
                EpisodeOutcome::Solved => solved += 1,
                EpisodeOutcome::TimedOut => timed_out += 1,
            }
            total_steps += steps;
            reward_sum += total_reward;
            history.record_episode(total_reward);

            let summary = EpisodeSummary {
                episode,
                outcome,
                total_reward,
                steps,
            };
            for observer in &mut self.observers {
                observer.on_episode_end(&summary)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(
            self.config.num_episodes,
            total_steps,
            solved,
            timed_out,
            reward_sum,
            history.into_points(),
        ))
    }
}
