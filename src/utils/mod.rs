// src/utils/mod.rs
//! Error type and logging setup shared across the crate

/// Error types and conversions
///
/// Contains the [`MinerError`] enum returned by every fallible operation.
pub mod error;

/// Logging configuration
pub mod logging;

pub use error::MinerError;
pub use logging::{init_bench_logging, init_logging};
