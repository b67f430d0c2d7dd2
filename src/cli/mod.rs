// src/cli/mod.rs
//! Command-line interface definitions

/// Clap command tree and option parsing helpers
pub mod commands;

pub use commands::{Action, BenchmarkOptions, Commands, ConfigOptions, MineOptions, parse_target};
