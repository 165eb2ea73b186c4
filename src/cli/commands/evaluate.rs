//! Evaluate command - score a position with exhaustive minimax

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use super::parse_player_token;
use crate::{
    cli::output::{format_number, print_board, print_kv, print_section},
    search::{Evaluation, Minimax, SearchStats},
    tictactoe::{Board, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a position with exhaustive minimax")]
pub struct EvaluateArgs {
    /// Board cells in row-major order using '.', 'X' and 'O' (whitespace ignored)
    #[arg(long, short = 'b', default_value = ".........")]
    pub board: String,

    /// Player to move (`x` or `o`); inferred from piece counts when omitted
    #[arg(long, short = 'p')]
    pub player: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct EvaluationReport {
    board: String,
    player: Player,
    #[serde(flatten)]
    evaluation: Evaluation,
    stats: SearchStats,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let board = Board::from_string(&args.board)
        .with_context(|| format!("Failed to parse board '{}'", args.board))?;
    let player = match &args.player {
        Some(value) => parse_player_token(value, "--player")?,
        None => board.next_player(),
    };

    if board.dim() > 3 {
        tracing::warn!(
            dim = board.dim(),
            "exhaustive search beyond 3x3 may not finish in reasonable time"
        );
    }

    let mut minimax = Minimax::new();
    let evaluation = minimax.evaluate(&board, player)?;
    let report = EvaluationReport {
        board: board.encode(),
        player,
        evaluation,
        stats: minimax.last_stats(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_section("Minimax Evaluation");
    print_board(&board);
    println!();
    print_kv("Player to move", &player.to_string());
    print_kv("Score (X view)", &report.evaluation.score.to_string());
    print_kv(
        "Best move",
        &report
            .evaluation
            .best_move
            .map_or_else(|| "none (terminal)".to_string(), |mv| mv.to_string()),
    );
    print_kv("Nodes", &format_number(report.stats.nodes));
    print_kv("Terminal nodes", &format_number(report.stats.terminal_nodes));
    print_kv("Win cutoffs", &format_number(report.stats.win_cutoffs));
    Ok(())
}
