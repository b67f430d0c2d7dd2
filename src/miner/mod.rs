// src/miner/mod.rs
//! Core mining functionality
//!
//! - Hash pipeline behind the [`Algorithm`] trait
//! - Scratch-buffer memory hardening
//! - The nonce search loop and its observer/clock seams
//! - A single-profile [`Worker`] and sequential batch runs

/// Mining hash algorithms
pub mod algorithm;

/// Sequential runs over several device profiles
pub mod batch;

/// Time source used for search timing
pub mod clock;

/// Nonce search loop
///
/// Drives nonces in ascending order, hardens memory periodically and
/// produces the final [`crate::stats::MiningReport`].
pub mod engine;

/// Scratch buffer owner
pub mod hardener;

/// Event sinks for search progress
pub mod observer;

/// Single-threaded worker bundling pipeline, hardener and engine
pub mod worker;

pub use self::algorithm::{Algorithm, HashPipeline};
pub use self::batch::run_batch;
pub use self::clock::{Clock, SystemClock};
pub use self::engine::{CancelToken, NonceSearchEngine, SearchParams};
pub use self::hardener::MemoryHardener;
pub use self::observer::{ChannelObserver, NullObserver, Progress, SearchEvent, SearchObserver};
pub use self::worker::Worker;
