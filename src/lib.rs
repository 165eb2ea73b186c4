//! Exhaustive game evaluation for N×N Tic-Tac-Toe
//!
//! This crate provides:
//! - An N×N board with win/draw detection and non-destructive move application
//! - Exhaustive minimax evaluation returning a score and a move
//! - Monte Carlo and random strategies behind a common trait
//! - A match driver that validates every move and reports through observers

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod search;
pub mod strategy;
pub mod tictactoe;

pub use error::{Error, Result};
pub use search::{Evaluation, evaluate};
pub use tictactoe::{Board, GameResult, Move, Player};
