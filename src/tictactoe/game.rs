//! Game results and recorded games

use serde::{Deserialize, Serialize};

use super::board::{Board, Move, Player};

/// Result of a board position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Win(Player),
    Draw,
    InProgress,
}

impl GameResult {
    /// Whether the game has concluded
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameResult::InProgress)
    }

    /// Fixed score of a concluded game from X's perspective: X win is +1,
    /// draw is 0, O win is -1. `None` while the game is in progress.
    pub fn score(self) -> Option<i32> {
        match self {
            GameResult::Win(player) => Some(player.sign()),
            GameResult::Draw => Some(0),
            GameResult::InProgress => None,
        }
    }
}

/// A single recorded placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub player: Player,
    #[serde(rename = "move")]
    pub mv: Move,
}

/// A game that ended because a player resigned or broke the rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forfeit {
    pub player: Player,
    pub reason: String,
}

/// A complete game with history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub dim: usize,
    pub first_player: Player,
    pub plays: Vec<Play>,
    pub result: GameResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forfeit: Option<Forfeit>,
}

impl GameRecord {
    /// Start recording a game on an empty `dim`×`dim` board
    pub fn new(dim: usize, first_player: Player) -> Self {
        GameRecord {
            dim,
            first_player,
            plays: Vec::new(),
            result: GameResult::InProgress,
            forfeit: None,
        }
    }

    /// Rebuild the final board from the recorded plays.
    ///
    /// # Errors
    ///
    /// Returns error if the history contains an illegal placement, which
    /// indicates corrupted game data.
    pub fn replay(&self) -> Result<Board, crate::Error> {
        let mut board = Board::new(self.dim)?;
        for play in &self.plays {
            board.place(play.mv, play.player)?;
        }
        Ok(board)
    }

    /// Winner of the game, counting forfeits
    pub fn winner(&self) -> Option<Player> {
        match self.result {
            GameResult::Win(player) => Some(player),
            GameResult::Draw | GameResult::InProgress => None,
        }
    }
}
