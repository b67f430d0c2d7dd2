// src/utils/error.rs
use serde_json;
use std::io;
use thiserror::Error;

/// Main error type for the miner
///
/// Only conditions that abort a run are errors. Running out of nonces or
/// being cancelled are ordinary search outcomes and live in the report.
#[derive(Error, Debug)]
pub enum MinerError {
    /// The hash pipeline could not produce a digest
    ///
    /// Fatal for the whole search; never retried.
    #[error("Hashing failure: {0}")]
    HashingFailure(String),

    /// Configuration file could not be read, parsed or validated
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Malformed user input (header hex, target literal)
    #[error("Invalid input: {0}")]
    InputError(String),

    /// Standard I/O operation errors
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Converts hex decoding errors into MinerError
///
/// Raised when a header is supplied as hex and does not decode.
impl From<hex::FromHexError> for MinerError {
    fn from(e: hex::FromHexError) -> Self {
        MinerError::InputError(format!("Hex conversion failed: {}", e))
    }
}

/// Converts TOML parse errors into MinerError
impl From<toml::de::Error> for MinerError {
    fn from(e: toml::de::Error) -> Self {
        MinerError::ConfigError(format!("Invalid config format: {}", e))
    }
}
