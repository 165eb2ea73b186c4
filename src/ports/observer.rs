//! Observer port - abstraction for match observation and data collection
//!
//! Logging, progress reporting and game export are all observers injected
//! by the caller, so the driver itself never prints.

use crate::{
    Result,
    pipeline::MatchSummary,
    ports::Turn,
    tictactoe::{Board, GameRecord, Player},
};

/// Observer trait for monitoring matches
///
/// # Event Sequence
///
/// 1. `on_match_start(total_games)` - Once at the beginning
/// 2. For each game:
///    - `on_game_start(game_num)`
///    - `on_turn(...)` - For each validated turn, before it is applied
///    - `on_game_end(game_num, record)`
/// 3. `on_match_end(summary)` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use ttt_minimax::{ports::Observer, tictactoe::GameRecord};
///
/// struct GameCounter {
///     games: usize,
/// }
///
/// impl Observer for GameCounter {
///     fn on_game_end(&mut self, _game_num: usize, _record: &GameRecord) -> ttt_minimax::Result<()> {
///         self.games += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when a match starts
    fn on_match_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a game starts
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        Ok(())
    }

    /// Called for each turn.
    ///
    /// # Parameters
    ///
    /// * `game_num` - Index of the current game
    /// * `step_num` - Turn number within the game (0-based)
    /// * `board` - Board before the turn is applied
    /// * `player` - Player whose turn it is
    /// * `turn` - The validated turn
    fn on_turn(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _board: &Board,
        _player: Player,
        _turn: &Turn,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when a game reaches a result (including forfeits)
    fn on_game_end(&mut self, _game_num: usize, _record: &GameRecord) -> Result<()> {
        Ok(())
    }

    /// Called when the match completes
    fn on_match_end(&mut self, _summary: &MatchSummary) -> Result<()> {
        Ok(())
    }
}
