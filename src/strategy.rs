//! Move-selection strategies

pub mod minimax;
pub mod monte_carlo;
pub mod random;

pub use minimax::MinimaxStrategy;
pub use monte_carlo::{MonteCarloConfig, MonteCarloStrategy};
pub use random::RandomStrategy;
