//! taxiq CLI - train, evaluate, and replay taxi grid-world Q-learning policies

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "taxiq")]
#[command(version, about = "Tabular Q-learning for the taxi grid world", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a Q-learning agent
    Train(taxiq::cli::commands::train::TrainArgs),

    /// Evaluate a trained policy with greedy rollouts
    Evaluate(taxiq::cli::commands::evaluate::EvaluateArgs),

    /// Replay one greedy episode step by step
    Rollout(taxiq::cli::commands::rollout::RolloutArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => taxiq::cli::commands::train::execute(args),
        Commands::Evaluate(args) => taxiq::cli::commands::evaluate::execute(args),
        Commands::Rollout(args) => taxiq::cli::commands::rollout::execute(args),
    }
}
