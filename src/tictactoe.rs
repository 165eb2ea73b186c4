//! N×N Tic-Tac-Toe game implementation

pub mod board;
pub mod game;
pub mod lines;

pub use board::{Board, Cell, Move, PieceCount, Player};
pub use game::{Forfeit, GameRecord, GameResult, Play};
pub use lines::{Line, LineAnalyzer, winning_lines};
