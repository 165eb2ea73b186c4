//! Match pipeline
//!
//! This module provides:
//! - The match driver that validates and applies strategy decisions
//! - Observers for logging, metrics, progress and game export

pub mod driver;
pub mod observers;

pub use driver::{MatchConfig, MatchRunner, MatchSummary};
pub use observers::{JsonlObserver, MetricsObserver, ProgressObserver, TracingObserver};

pub use crate::ports::{Observer, Strategy};
