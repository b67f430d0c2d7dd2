// src/miner/worker.rs
//! Single-threaded mining worker
//!
//! Bundles the production hash pipeline, a profile-sized hardener and the
//! search engine behind a two-call API: build a worker for a device
//! profile, then `mine`.

use crate::config::Config;
use crate::miner::algorithm::{Algorithm, HashPipeline};
use crate::miner::engine::{CancelToken, NonceSearchEngine, SearchParams};
use crate::miner::hardener::MemoryHardener;
use crate::miner::observer::SearchObserver;
use crate::stats::report::MiningReport;
use crate::types::DeviceProfile;
use crate::utils::error::MinerError;
use std::sync::Arc;

/// Mining worker for one device profile
pub struct Worker {
    engine: NonceSearchEngine,
}

impl Worker {
    /// Creates a worker whose hardener is seeded from system entropy
    ///
    /// # Arguments
    /// * `profile` - A [`DeviceProfile`] or a profile name; unknown names
    ///   fall back to the default profile
    pub fn new(profile: impl Into<DeviceProfile>) -> Self {
        let profile = profile.into();
        Self::with_hardener(profile, MemoryHardener::from_entropy(profile))
    }

    /// Creates a worker with a reproducible hardener
    pub fn with_seed(profile: impl Into<DeviceProfile>, seed: u64) -> Self {
        let profile = profile.into();
        Self::with_hardener(profile, MemoryHardener::seeded(profile, seed))
    }

    /// Creates a worker for `profile` using the seed and tuning in `config`
    pub fn from_config(config: &Config, profile: DeviceProfile) -> Self {
        let worker = match config.seed {
            Some(seed) => Self::with_seed(profile, seed),
            None => Self::new(profile),
        };
        worker.with_params(config.search_params())
    }

    fn with_hardener(profile: DeviceProfile, hardener: MemoryHardener) -> Self {
        let algorithm: Arc<dyn Algorithm> = Arc::new(HashPipeline::new());
        Worker {
            engine: NonceSearchEngine::new(profile, algorithm, hardener),
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn SearchObserver>) -> Self {
        self.engine = self.engine.with_observer(observer);
        self
    }

    pub fn with_params(mut self, params: SearchParams) -> Self {
        self.engine = self.engine.with_params(params);
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.engine = self.engine.with_cancel_token(cancel);
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.engine.cancel_token()
    }

    pub fn device(&self) -> DeviceProfile {
        self.engine.device()
    }

    /// Runs one search; see [`NonceSearchEngine::search`]
    pub fn mine(&mut self, header: &[u8], target: u32, max_attempts: u64) -> Result<MiningReport, MinerError> {
        self.engine.search(header, target, max_attempts)
    }
}
