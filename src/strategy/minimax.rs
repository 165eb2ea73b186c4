//! Strategy adapter for the exhaustive minimax evaluator

use tracing::debug;

use crate::{
    Error, Result,
    ports::{Decision, Strategy},
    search::{Minimax, SearchStats},
    tictactoe::{Board, Player},
};

/// Plays the move chosen by [`crate::search::evaluate`]
#[derive(Debug, Clone)]
pub struct MinimaxStrategy {
    name: String,
    minimax: Minimax,
}

impl MinimaxStrategy {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            minimax: Minimax::new(),
        }
    }

    /// Statistics of the most recent search
    pub fn last_stats(&self) -> SearchStats {
        self.minimax.last_stats()
    }
}

impl Default for MinimaxStrategy {
    fn default() -> Self {
        Self::new("Minimax")
    }
}

impl Strategy for MinimaxStrategy {
    fn decide(&mut self, board: &Board, player: Player) -> Result<Decision> {
        if board.terminal_result().is_terminal() {
            return Err(Error::GameOver);
        }

        let evaluation = self.minimax.evaluate(board, player)?;
        let stats = self.minimax.last_stats();
        debug!(
            strategy = %self.name,
            %player,
            score = evaluation.score,
            nodes = stats.nodes,
            cutoffs = stats.win_cutoffs,
            "minimax search finished"
        );

        // A non-terminal board always yields a move; the sentinel here means
        // the evaluator broke its contract.
        let mv = evaluation.best_move.ok_or(Error::NoValidMoves)?;
        Ok(Decision::Move(mv))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
