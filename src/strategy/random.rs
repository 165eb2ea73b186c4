//! Uniform random baseline

use rand::{Rng, SeedableRng, random, rngs::StdRng};

use crate::{
    Error, Result,
    ports::{Decision, Strategy},
    tictactoe::{Board, Player},
};

/// Picks an empty square uniformly at random
pub struct RandomStrategy {
    name: String,
    rng: StdRng,
}

impl RandomStrategy {
    /// Create a new random strategy
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a new random strategy with a deterministic seed
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new("Random")
    }
}

impl Strategy for RandomStrategy {
    fn decide(&mut self, board: &Board, _player: Player) -> Result<Decision> {
        let moves = board.empty_cells();
        if moves.is_empty() {
            return Err(Error::NoValidMoves);
        }
        let index = self.rng.random_range(0..moves.len());
        Ok(Decision::Move(moves[index]))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}
