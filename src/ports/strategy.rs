//! Strategy port - abstraction for anything that picks moves
//!
//! The match driver talks to players only through this trait, so the
//! exhaustive minimax player, the Monte Carlo player and random baselines
//! are interchangeable.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    tictactoe::{Board, Move, Player},
};

/// What a strategy wants to do on its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Move(Move),
    Resign,
}

/// A turn after the driver has validated the strategy's decision.
///
/// Only [`Turn::Move`] is ever applied to the live board. `Resign` and
/// `Illegal` end the game in favour of the opponent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    Move(Move),
    Resign,
    Illegal {
        attempted: Option<Move>,
        reason: String,
    },
}

impl Turn {
    /// Reason the game was forfeited on this turn, if it was
    pub fn forfeit_reason(&self) -> Option<String> {
        match self {
            Turn::Move(_) => None,
            Turn::Resign => Some("resigned".to_string()),
            Turn::Illegal { reason, .. } => Some(reason.clone()),
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Turn::Move(mv) => write!(f, "{mv}"),
            Turn::Resign => write!(f, "resign"),
            Turn::Illegal {
                attempted: Some(mv),
                reason,
            } => write!(f, "illegal {mv}: {reason}"),
            Turn::Illegal {
                attempted: None,
                reason,
            } => write!(f, "illegal: {reason}"),
        }
    }
}

/// Strategy trait - unified interface for move selection
///
/// # Examples
///
/// ```no_run
/// use ttt_minimax::{
///     ports::{Decision, Strategy},
///     tictactoe::{Board, Player},
/// };
///
/// struct FirstEmpty;
///
/// impl Strategy for FirstEmpty {
///     fn decide(&mut self, board: &Board, _player: Player) -> ttt_minimax::Result<Decision> {
///         Ok(board
///             .empty_cells()
///             .first()
///             .map_or(Decision::Resign, |&mv| Decision::Move(mv)))
///     }
///
///     fn name(&self) -> &str {
///         "first-empty"
///     }
/// }
/// ```
pub trait Strategy: Send {
    /// Choose a move for `player` on a non-terminal `board`.
    ///
    /// The driver validates the returned move, so implementations may be
    /// wrong without corrupting the game; an invalid move forfeits.
    ///
    /// # Errors
    ///
    /// Any error is treated by the driver as an illegal turn.
    fn decide(&mut self, board: &Board, player: Player) -> Result<Decision>;

    /// Name used in logs and summaries
    fn name(&self) -> &str;

    /// Reseed any internal random number generator.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for deterministic strategies.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}
