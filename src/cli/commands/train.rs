//! Train command - run the Q-learning training loop

use std::{io, path::PathBuf};

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::output,
    pipeline::{JsonlObserver, ProgressObserver, StepLogObserver, TrainingConfig, TrainingPipeline},
    ports::Observer,
    q_learning::{SavedPolicy, TrainingMetadata},
};

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent on the taxi grid world")]
pub struct TrainArgs {
    /// Number of training episodes
    #[arg(long, short = 'e', default_value_t = 5000)]
    pub episodes: usize,

    /// Learning rate alpha (0.0-1.0)
    #[arg(long, default_value_t = 0.1)]
    pub learning_rate: f64,

    /// Discount factor gamma (0.0-1.0)
    #[arg(long, default_value_t = 0.99)]
    pub discount: f64,

    /// Exploration rate epsilon (0.0-1.0)
    #[arg(long, default_value_t = 0.1)]
    pub epsilon: f64,

    /// Per-episode step budget
    #[arg(long, default_value_t = 200)]
    pub step_budget: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Capacity of the batched reward history
    #[arg(long, default_value_t = 1280)]
    pub history_points: usize,

    /// Output file for the trained policy
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Optional file for JSONL step observations
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Optional path for writing the reward history as CSV
    #[arg(long)]
    pub history_csv: Option<PathBuf>,

    /// Show progress bar
    #[arg(long, default_value_t = true)]
    pub progress: bool,

    /// Log every step of the first and last N episodes to the console
    #[arg(long, default_value_t = 0)]
    pub log_episodes: usize,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = TrainingConfig {
        num_episodes: args.episodes,
        learning_rate: args.learning_rate,
        discount_factor: args.discount,
        epsilon: args.epsilon,
        step_budget: args.step_budget,
        seed: args.seed,
        history_capacity: args.history_points,
    };

    let mut env = config.build_env();
    let mut agent = config.build_agent()?;

    let mut pipeline = TrainingPipeline::new(config);
    if args.log_episodes > 0 {
        let logger: Box<dyn Observer> =
            Box::new(StepLogObserver::new(io::stdout(), args.log_episodes));
        pipeline = pipeline.with_observer(logger);
    }
    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.observations {
        pipeline = pipeline.with_observer(Box::new(JsonlObserver::new(path)?));
    }

    let result = pipeline.run(&mut agent, &mut env)?;

    output::print_section("Training complete");
    output::print_kv("Episodes", &result.total_episodes.to_string());
    output::print_kv("Total steps", &result.total_steps.to_string());
    output::print_kv(
        "Solved",
        &format!("{} ({:.1}%)", result.solved, result.solve_rate * 100.0),
    );
    output::print_kv("Timed out", &result.timed_out.to_string());
    output::print_kv("Mean reward", &format!("{:.2}", result.mean_reward));

    if let Some(path) = &args.summary {
        result.save(path)?;
        output::print_kv("Summary", &path.display().to_string());
    }

    if let Some(path) = &args.history_csv {
        result.save_history_csv(path)?;
        output::print_kv("Reward history", &path.display().to_string());
    }

    if let Some(path) = &args.output {
        let metadata = TrainingMetadata {
            episodes: args.episodes,
            step_budget: args.step_budget,
            seed: args.seed,
        };
        SavedPolicy::from_agent(&agent, metadata).save_to_file(path)?;
        output::print_kv("Policy", &path.display().to_string());
    }

    Ok(())
}
