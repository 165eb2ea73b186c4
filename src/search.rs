//! Game-tree search

pub mod minimax;

pub use minimax::{Evaluation, Minimax, SearchStats, evaluate};
