//! Command-line front end for the tic-tac-toe evaluator
//!
//! - `evaluate`: score a position with exhaustive minimax
//! - `play`: run a match between minimax, Monte Carlo and random players

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ttt-minimax")]
#[command(version, about = "Exhaustive game evaluation for N×N tic-tac-toe", long_about = None)]
struct Cli {
    /// Tracing filter, e.g. "info", "debug", "ttt_minimax=trace"
    #[arg(long, global = true, default_value = "info")]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a position with exhaustive minimax
    Evaluate(ttt_minimax::cli::commands::evaluate::EvaluateArgs),

    /// Play a match between two strategies
    Play(ttt_minimax::cli::commands::play::PlayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&cli.log))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Evaluate(args) => ttt_minimax::cli::commands::evaluate::execute(args),
        Commands::Play(args) => ttt_minimax::cli::commands::play::execute(args),
    }
}
