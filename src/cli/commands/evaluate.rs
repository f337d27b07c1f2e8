//! Evaluate command - greedy rollouts of a trained policy

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::output,
    pipeline::{EvaluationConfig, evaluate_greedy},
    q_learning::SavedPolicy,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a trained policy with greedy rollouts")]
pub struct EvaluateArgs {
    /// Trained policy file produced by `train --output`
    pub policy: PathBuf,

    /// Number of evaluation episodes
    #[arg(long, short = 'e', default_value_t = 100)]
    pub episodes: usize,

    /// Per-episode step budget
    #[arg(long, default_value_t = 200)]
    pub step_budget: usize,

    /// Random seed for the start-state distribution
    #[arg(long)]
    pub seed: Option<u64>,

    /// Optional path for writing the summary as JSON
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let agent = SavedPolicy::load_from_file(&args.policy)?.to_agent()?;

    let config = EvaluationConfig {
        num_episodes: args.episodes,
        step_budget: args.step_budget,
        seed: args.seed,
    };
    let summary = evaluate_greedy(agent.q_table(), &config)?;

    output::print_section("Greedy evaluation");
    output::print_kv("Policy", &args.policy.display().to_string());
    output::print_kv("Episodes", &summary.episodes.to_string());
    output::print_kv(
        "Solved",
        &format!("{} ({:.1}%)", summary.solved, summary.solve_rate * 100.0),
    );
    output::print_kv(
        "Reward",
        &format!(
            "mean {:.2}, std {:.2}, min {:.1}, max {:.1}",
            summary.mean_reward, summary.std_dev_reward, summary.min_reward, summary.max_reward
        ),
    );
    output::print_kv("Mean steps", &format!("{:.1}", summary.mean_steps));

    if let Some(path) = &args.summary {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, &summary)?;
        output::print_kv("Summary", &path.display().to_string());
    }

    Ok(())
}
