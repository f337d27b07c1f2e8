//! Rollout command - trace one greedy episode step by step

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::output,
    q_learning::SavedPolicy,
    taxi::{ALL_ACTIONS, TaxiEnv},
};

#[derive(Parser, Debug)]
#[command(about = "Replay one greedy episode of a trained policy")]
pub struct RolloutArgs {
    /// Trained policy file produced by `train --output`
    pub policy: PathBuf,

    /// Per-episode step budget
    #[arg(long, default_value_t = 200)]
    pub step_budget: usize,

    /// Random seed for the start state
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the full action-value row at every step
    #[arg(long, default_value_t = false)]
    pub show_values: bool,
}

pub fn execute(args: RolloutArgs) -> Result<()> {
    let agent = SavedPolicy::load_from_file(&args.policy)?.to_agent()?;
    let q_table = agent.q_table();

    let mut env = TaxiEnv::new(args.step_budget);
    if let Some(seed) = args.seed {
        env = env.with_seed(seed);
    }

    let start = env.observation();
    output::print_section("Greedy rollout");
    output::print_kv(
        "Start",
        &format!(
            "taxi ({}, {}), passenger {}, destination {}",
            start.taxi_row, start.taxi_col, start.passenger, start.destination
        ),
    );
    output::print_subsection("Trace");

    let mut total_reward = 0.0;
    loop {
        let state = env.encoded_state();
        let action = q_table.greedy_action(state);

        if args.show_values {
            let values = q_table.values(state);
            let row = ALL_ACTIONS
                .iter()
                .map(|a| format!("{}:{:.2}", a.name(), values[a.index()]))
                .collect::<Vec<_>>()
                .join("  ");
            println!("  state {state}: {row}");
        }

        let outcome = env.step(action)?;
        total_reward += outcome.reward;
        let obs = env.observation();
        println!(
            "  [{:>3}] {:<7} -> pos ({}, {}) pass {} reward {:+.0}",
            env.step_count(),
            action.name(),
            obs.taxi_row,
            obs.taxi_col,
            obs.passenger,
            outcome.reward,
        );

        if outcome.terminated {
            break;
        }
    }

    let outcome_label = env
        .outcome()
        .map(|o| o.label())
        .unwrap_or("running");
    output::print_subsection("Result");
    output::print_kv("Outcome", outcome_label);
    output::print_kv("Steps", &env.step_count().to_string());
    output::print_kv("Total reward", &format!("{total_reward:+.0}"));

    Ok(())
}
