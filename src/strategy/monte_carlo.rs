//! Monte Carlo player
//!
//! Each trial plays uniformly random moves from the current position until
//! the game ends, then credits or debits every occupied square of the
//! finished board depending on who won. The move played is a uniformly
//! random choice among the empty squares with the highest total.

use rand::{Rng, SeedableRng, random, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Result,
    ports::{Decision, Strategy},
    tictactoe::{Board, GameResult, Move, Player},
};

/// Tuning for [`MonteCarloStrategy`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    /// Random playouts per decision
    pub trials: usize,
    /// Weight for squares held by the player to move
    pub score_current: f64,
    /// Weight for squares held by the opponent
    pub score_other: f64,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            trials: 10,
            score_current: 1.0,
            score_other: 1.0,
        }
    }
}

impl MonteCarloConfig {
    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            return Err(Error::InvalidConfiguration {
                message: "monte carlo trials must be at least 1".to_string(),
            });
        }
        for (label, value) in [
            ("score_current", self.score_current),
            ("score_other", self.score_other),
        ] {
            if !value.is_finite() {
                return Err(Error::InvalidConfiguration {
                    message: format!("{label} must be finite, got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// Monte Carlo move selection by random playouts
pub struct MonteCarloStrategy {
    name: String,
    config: MonteCarloConfig,
    rng: StdRng,
}

impl MonteCarloStrategy {
    pub fn new(name: impl Into<String>, config: MonteCarloConfig) -> Self {
        Self {
            name: name.into(),
            config,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    pub fn with_seed(name: impl Into<String>, config: MonteCarloConfig, seed: u64) -> Self {
        Self {
            name: name.into(),
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Play random moves on `board`, starting with `player`, until the game ends
    pub fn trial(&mut self, board: &mut Board, player: Player) -> Result<()> {
        let mut to_move = player;
        while !board.terminal_result().is_terminal() {
            let empty = board.empty_cells();
            if empty.is_empty() {
                return Err(Error::EmptyMoveSetOnNonTerminalBoard);
            }
            let mv = empty[self.rng.random_range(0..empty.len())];
            board.place(mv, to_move)?;
            to_move = to_move.opponent();
        }
        Ok(())
    }

    /// Accumulate the squares of a finished playout into `scores`.
    ///
    /// Draws and unfinished boards leave the grid untouched. Empty squares
    /// are never scored.
    pub fn update_scores(&self, scores: &mut [f64], board: &Board, player: Player) {
        let player_won = match board.terminal_result() {
            GameResult::Win(winner) => winner == player,
            GameResult::Draw | GameResult::InProgress => return,
        };

        let (current, other) = if player_won {
            (self.config.score_current, -self.config.score_other)
        } else {
            (-self.config.score_current, self.config.score_other)
        };

        for (idx, (_, owner)) in board.owners().enumerate() {
            match owner {
                Some(p) if p == player => scores[idx] += current,
                Some(_) => scores[idx] += other,
                None => {}
            }
        }
    }

    /// Run every trial and return the row-major score grid
    pub fn score_grid(&mut self, board: &Board, player: Player) -> Result<Vec<f64>> {
        let mut scores = vec![0.0; board.dim() * board.dim()];
        for _ in 0..self.config.trials {
            let mut playout = board.clone();
            self.trial(&mut playout, player)?;
            self.update_scores(&mut scores, &playout, player);
        }
        Ok(scores)
    }

    /// Pick uniformly among the empty squares holding the maximum score
    pub fn best_move(&mut self, board: &Board, scores: &[f64]) -> Result<Move> {
        let mut best_value = f64::NEG_INFINITY;
        let mut candidates = Vec::new();

        for mv in board.empty_cells() {
            let value = scores[mv.row * board.dim() + mv.col];
            if value > best_value {
                best_value = value;
                candidates.clear();
                candidates.push(mv);
            } else if value == best_value {
                candidates.push(mv);
            }
        }

        if candidates.is_empty() {
            return Err(Error::NoValidMoves);
        }
        Ok(candidates[self.rng.random_range(0..candidates.len())])
    }
}

impl Default for MonteCarloStrategy {
    fn default() -> Self {
        Self::new("MonteCarlo", MonteCarloConfig::default())
    }
}

impl Strategy for MonteCarloStrategy {
    fn decide(&mut self, board: &Board, player: Player) -> Result<Decision> {
        if board.terminal_result().is_terminal() {
            return Err(Error::GameOver);
        }
        let scores = self.score_grid(board, player)?;
        let mv = self.best_move(board, &scores)?;
        debug!(
            strategy = %self.name,
            %player,
            trials = self.config.trials,
            %mv,
            "monte carlo playouts finished"
        );
        Ok(Decision::Move(mv))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy() -> MonteCarloStrategy {
        MonteCarloStrategy::with_seed("mc", MonteCarloConfig::default(), 11)
    }

    #[test]
    fn test_trial_reaches_terminal_without_touching_input() {
        let mut mc = strategy();
        let board = Board::from_string("X.. .O. ...").unwrap();
        let mut playout = board.clone();
        mc.trial(&mut playout, Player::X).unwrap();
        assert!(playout.terminal_result().is_terminal());
        assert_eq!(board.encode(), "X...O....");
        assert_eq!(playout.square(0, 0).unwrap(), board.square(0, 0).unwrap());
    }

    #[test]
    fn test_update_scores_on_win_for_player() {
        let mc = strategy();
        let board = Board::from_string("XXX OO. ...").unwrap();
        let mut scores = vec![0.0; 9];
        mc.update_scores(&mut scores, &board, Player::X);
        assert_eq!(scores, vec![1.0, 1.0, 1.0, -1.0, -1.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_update_scores_on_loss_for_player() {
        let config = MonteCarloConfig {
            trials: 1,
            score_current: 2.0,
            score_other: 0.5,
        };
        let mc = MonteCarloStrategy::with_seed("mc", config, 0);
        let board = Board::from_string("XXX OO. ...").unwrap();
        let mut scores = vec![0.0; 9];
        mc.update_scores(&mut scores, &board, Player::O);
        assert_eq!(scores, vec![0.5, 0.5, 0.5, -2.0, -2.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_update_scores_ignores_draws() {
        let mc = strategy();
        let board = Board::from_string("XOX XOO OXX").unwrap();
        let mut scores = vec![0.0; 9];
        mc.update_scores(&mut scores, &board, Player::X);
        assert!(scores.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_best_move_ignores_occupied_squares() {
        let mut mc = strategy();
        let board = Board::from_string("X.. ... ...").unwrap();
        let mut scores = vec![0.0; 9];
        scores[0] = 100.0;
        scores[5] = 3.0;
        assert_eq!(mc.best_move(&board, &scores).unwrap(), Move::new(1, 2));
    }

    #[test]
    fn test_best_move_breaks_ties_among_maxima() {
        let mut mc = strategy();
        let board = Board::new(3).unwrap();
        let mut scores = vec![-1.0; 9];
        scores[2] = 4.0;
        scores[7] = 4.0;
        for _ in 0..20 {
            let mv = mc.best_move(&board, &scores).unwrap();
            assert!(mv == Move::new(0, 2) || mv == Move::new(2, 1));
        }
    }

    #[test]
    fn test_best_move_handles_very_negative_scores() {
        let mut mc = strategy();
        let board = Board::from_string("XO. ... ...").unwrap();
        let scores = vec![-500.0; 9];
        assert!(mc.best_move(&board, &scores).is_ok());
    }

    #[test]
    fn test_single_empty_square_is_chosen() {
        let config = MonteCarloConfig {
            trials: 50,
            ..MonteCarloConfig::default()
        };
        let mut mc = MonteCarloStrategy::with_seed("mc", config, 3);
        let board = Board::from_string("XOX OOX X.O").unwrap();
        assert_eq!(
            mc.decide(&board, Player::X).unwrap(),
            Decision::Move(Move::new(2, 1))
        );
    }

    #[test]
    fn test_config_validation() {
        assert!(MonteCarloConfig::default().validate().is_ok());
        let bad = MonteCarloConfig {
            trials: 0,
            ..MonteCarloConfig::default()
        };
        assert!(bad.validate().is_err());
    }
}
