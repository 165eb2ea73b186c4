//! Play command - run a match between two strategies

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::warn;

use super::parse_player_token;
use crate::{
    cli::output::{print_kv, print_section},
    pipeline::{
        JsonlObserver, MatchConfig, MatchRunner, MetricsObserver, ProgressObserver,
        TracingObserver,
    },
    ports::Strategy,
    strategy::{MinimaxStrategy, MonteCarloConfig, MonteCarloStrategy, RandomStrategy},
};

/// Strategies selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyKind {
    Minimax,
    MonteCarlo,
    Random,
}

#[derive(Parser, Debug)]
#[command(about = "Play a match between two strategies")]
pub struct PlayArgs {
    /// Strategy controlling X
    #[arg(long, value_enum, default_value = "minimax")]
    pub x: StrategyKind,

    /// Strategy controlling O
    #[arg(long, value_enum, default_value = "monte-carlo")]
    pub o: StrategyKind,

    /// JSON match configuration; flags below override its fields
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Board side length
    #[arg(long)]
    pub dim: Option<usize>,

    /// Number of games
    #[arg(long, short = 'g')]
    pub games: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Which token opens each game (`x` or `o`)
    #[arg(long)]
    pub first: Option<String>,

    /// Per-move time limit in milliseconds; overrunning forfeits the game
    #[arg(long)]
    pub time_limit_ms: Option<u64>,

    /// Monte Carlo playouts per move
    #[arg(long, default_value_t = MonteCarloConfig::default().trials)]
    pub trials: usize,

    /// Export every game as JSON lines
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Write the match summary as JSON
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Show a progress bar
    #[arg(long)]
    pub progress: bool,
}

fn build_strategy(kind: StrategyKind, name: &str, mc: MonteCarloConfig) -> Box<dyn Strategy> {
    match kind {
        StrategyKind::Minimax => Box::new(MinimaxStrategy::new(format!("Minimax-{name}"))),
        StrategyKind::MonteCarlo => {
            Box::new(MonteCarloStrategy::new(format!("MonteCarlo-{name}"), mc))
        }
        StrategyKind::Random => Box::new(RandomStrategy::new(format!("Random-{name}"))),
    }
}

fn resolve_config(args: &PlayArgs) -> Result<MatchConfig> {
    let mut config = match &args.config {
        Some(path) => MatchConfig::load(path)
            .with_context(|| format!("Failed to load match config {}", path.display()))?,
        None => MatchConfig::default(),
    };

    if let Some(dim) = args.dim {
        config.dim = dim;
    }
    if let Some(games) = args.games {
        config.games = games;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(first) = &args.first {
        config.first_player = parse_player_token(first, "--first")?;
    }
    if let Some(limit) = args.time_limit_ms {
        config.move_time_limit_ms = Some(limit);
    }
    config.validate()?;
    Ok(config)
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let mc = MonteCarloConfig {
        trials: args.trials,
        ..MonteCarloConfig::default()
    };
    mc.validate()?;

    if config.dim > 3 && (args.x == StrategyKind::Minimax || args.o == StrategyKind::Minimax) {
        warn!(
            dim = config.dim,
            "exhaustive minimax beyond 3x3 may not finish in reasonable time"
        );
    }

    let mut x = build_strategy(args.x, "X", mc);
    let mut o = build_strategy(args.o, "O", mc);

    let mut runner = MatchRunner::new(config.clone())?.with_observer(Box::new(TracingObserver));
    if args.progress {
        runner = runner.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.export {
        let observer = JsonlObserver::new(path)
            .with_context(|| format!("Failed to open export file {}", path.display()))?;
        runner = runner.with_observer(Box::new(observer));
    }
    runner = runner.with_observer(Box::new(MetricsObserver::new()));

    let summary = runner.run(x.as_mut(), o.as_mut())?;

    print_section("Match Summary");
    print_kv("X", x.name());
    print_kv("O", o.name());
    print_kv("Board", &format!("{0}x{0}", config.dim));
    print_kv("First player", &config.first_player.to_string());
    print_kv("Games", &summary.games.to_string());
    print_kv("X wins", &summary.x_wins.to_string());
    print_kv("O wins", &summary.o_wins.to_string());
    print_kv(
        "Draws",
        &format!("{} ({:.1}%)", summary.draws, summary.draw_rate() * 100.0),
    );
    print_kv("Forfeits", &summary.forfeits.to_string());

    if let Some(path) = &args.summary {
        summary
            .save(path)
            .with_context(|| format!("Failed to write summary {}", path.display()))?;
        println!("\nSummary written to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Player;

    fn args() -> PlayArgs {
        PlayArgs::parse_from(["play"])
    }

    #[test]
    fn test_defaults() {
        let args = args();
        assert_eq!(args.x, StrategyKind::Minimax);
        assert_eq!(args.o, StrategyKind::MonteCarlo);
        assert_eq!(args.trials, 10);
        assert_eq!(resolve_config(&args).unwrap(), MatchConfig::default());
    }

    #[test]
    fn test_flags_override_config() {
        let args = PlayArgs::parse_from([
            "play",
            "--o",
            "random",
            "--games",
            "5",
            "--first",
            "o",
            "--seed",
            "3",
        ]);
        let config = resolve_config(&args).unwrap();
        assert_eq!(args.o, StrategyKind::Random);
        assert_eq!(config.games, 5);
        assert_eq!(config.first_player, Player::O);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_rejects_zero_dimension() {
        let args = PlayArgs::parse_from(["play", "--dim", "0"]);
        assert!(resolve_config(&args).is_err());
    }
}
