//! Memory-hard proof-of-work mining core
//!
//! Searches the nonce space of a block header template for a digest below
//! a 32-bit target, while measuring true hash rate and memory footprint:
//! - XXH3 pre-hash followed by SHA-256 over `header || nonce`
//! - Scratch-buffer hardening sized by device profile
//! - Single-threaded, cancellable nonce search with pluggable observers
//! - Batch runs over several profiles with a JSON results file

#![forbid(unsafe_code)]

/// Miner core: hash pipeline, memory hardening and the search loop
pub mod miner;

/// Mining reports, summaries and result persistence
pub mod stats;

/// Error type and logging setup
pub mod utils;

/// Command-line interface definitions
pub mod cli;

/// Configuration management
pub mod config;

/// Shared type definitions
pub mod types;

// Core exports
pub use cli::Commands;
pub use config::Config;
pub use miner::{
    Algorithm, CancelToken, HashPipeline, MemoryHardener, NonceSearchEngine, SearchObserver, Worker,
};
pub use stats::{MiningReport, ResultsWriter, SearchOutcome, StatsReporter};
pub use types::DeviceProfile;
pub use utils::{MinerError, init_logging};
