//! Ports (trait boundaries) between the match driver and its collaborators.
//!
//! Strategies choose moves, observers watch games. Both are owned by the
//! domain and implemented by adapters elsewhere in the crate or by callers.

pub mod observer;
pub mod strategy;

pub use observer::Observer;
pub use strategy::{Decision, Strategy, Turn};
