//! CLI infrastructure
//!
//! This module provides the command-line interface for evaluating positions
//! and running matches between strategies.

pub mod commands;
pub mod output;
