//! Exhaustive minimax evaluation
//!
//! Scores are always reported from X's perspective: +1 for an X win, 0 for a
//! draw, -1 for an O win. X maximizes, O minimizes.
//!
//! Move ordering follows [`Board::empty_cells`] (row-major). Two tie-break
//! rules apply while scanning the moves of a node:
//!
//! - The first move whose value is the best possible outcome for the mover
//!   is returned at once, without looking at the remaining moves. This fires
//!   for any forced win, not only for a move that completes a line.
//! - Otherwise the last move that draws is kept. If no move draws, the last
//!   losing move is kept.
//!
//! The search is unbounded. It is practical on 3×3 boards only; larger boards
//! are accepted but will not finish in reasonable time.

use serde::Serialize;

use crate::{
    Error, Result,
    tictactoe::{Board, Move, Player},
};

/// Outcome of evaluating a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    /// Game value from X's perspective, in {-1, 0, +1}
    pub score: i32,
    /// Chosen move, `None` only for terminal boards
    pub best_move: Option<Move>,
}

impl Evaluation {
    fn terminal(score: i32) -> Self {
        Evaluation {
            score,
            best_move: None,
        }
    }
}

/// Counters collected during one top-level evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Positions visited, including the root and terminal leaves
    pub nodes: u64,
    /// Terminal positions reached
    pub terminal_nodes: u64,
    /// Nodes that stopped early on a move achieving the mover's best outcome
    pub win_cutoffs: u64,
}

/// Evaluate `board` with `player` to move.
///
/// Never mutates `board`; each hypothetical move is applied to a clone.
///
/// # Errors
///
/// Returns [`Error::EmptyMoveSetOnNonTerminalBoard`] if the board reports
/// itself in progress but has no empty squares, and propagates placement
/// errors, both of which indicate a broken board implementation.
pub fn evaluate(board: &Board, player: Player) -> Result<Evaluation> {
    let mut stats = SearchStats::default();
    search(board, player, &mut stats)
}

/// Minimax searcher that keeps statistics for its most recent evaluation
#[derive(Debug, Clone, Default)]
pub struct Minimax {
    last_stats: SearchStats,
}

impl Minimax {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate `board` with `player` to move, recording search statistics
    pub fn evaluate(&mut self, board: &Board, player: Player) -> Result<Evaluation> {
        let mut stats = SearchStats::default();
        let evaluation = search(board, player, &mut stats)?;
        self.last_stats = stats;
        Ok(evaluation)
    }

    /// Statistics of the last successful evaluation
    pub fn last_stats(&self) -> SearchStats {
        self.last_stats
    }
}

fn search(board: &Board, player: Player, stats: &mut SearchStats) -> Result<Evaluation> {
    stats.nodes += 1;

    if let Some(score) = board.terminal_result().score() {
        stats.terminal_nodes += 1;
        return Ok(Evaluation::terminal(score));
    }

    let moves = board.empty_cells();
    if moves.is_empty() {
        return Err(Error::EmptyMoveSetOnNonTerminalBoard);
    }

    let sign = player.sign();
    // Running result, normalized to the mover's perspective.
    let mut best_normalized = -1;
    let mut best_move = None;

    for mv in moves {
        let child = board.with_move(mv, player)?;
        let child_score = search(&child, player.opponent(), stats)?.score;

        match child_score * sign {
            1 => {
                stats.win_cutoffs += 1;
                return Ok(Evaluation {
                    score: child_score,
                    best_move: Some(mv),
                });
            }
            0 => {
                best_normalized = 0;
                best_move = Some(mv);
            }
            _ if best_normalized == -1 => best_move = Some(mv),
            _ => {}
        }
    }

    Ok(Evaluation {
        score: best_normalized * sign,
        best_move,
    })
}
