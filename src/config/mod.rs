// src/config/mod.rs
//! Configuration management
//!
//! Loads the TOML file describing a batch of mining runs and generates a
//! commented template for new setups.

/// Core configuration implementation
pub mod config;

pub use config::Config;

use crate::utils::error::MinerError;
use std::path::PathBuf;

/// Loads miner configuration from a TOML file
pub fn load(path: impl Into<PathBuf>) -> Result<Config, MinerError> {
    Config::load(path)
}

/// Generates a commented configuration template
pub fn generate_template() -> String {
    Config::generate_template()
}
