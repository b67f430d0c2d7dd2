// src/miner/engine.rs
//! Nonce search loop
//!
//! Tries nonces `0, 1, 2, ...` in order against a single header and target,
//! stopping at the first digest whose leading value is below the target,
//! when `max_attempts` nonces have been tried, or when cancelled. Every
//! `progress_interval` nonces the scratch buffer is hardened and the
//! observer gets a progress tick.

use crate::miner::algorithm::{Algorithm, meets_target};
use crate::miner::clock::{Clock, SystemClock};
use crate::miner::hardener::MemoryHardener;
use crate::miner::observer::{NullObserver, Progress, SearchObserver};
use crate::stats::report::{MiningReport, SearchOutcome, hash_rate};
use crate::types::DeviceProfile;
use crate::utils::error::MinerError;
use rand::RngCore;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Size of the u32 nonce space; the hard ceiling on attempts per search
pub const NONCE_SPACE: u64 = 1 << 32;

/// Nonces between hardening passes and progress ticks
pub const DEFAULT_PROGRESS_INTERVAL: u32 = 1000;

/// Windows perturbed per hardening pass
pub const DEFAULT_HARDEN_ROUNDS: u32 = 1024;

/// Loop tuning knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    /// Harden and report progress whenever `nonce % progress_interval == 0`
    /// (nonce 0 excluded). Zero is treated as 1.
    pub progress_interval: u32,
    /// Rounds passed to [`MemoryHardener::harden`] on each pass
    pub harden_rounds: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            harden_rounds: DEFAULT_HARDEN_ROUNDS,
        }
    }
}

/// Shared flag used to stop a running search from outside
///
/// Clones share the same flag. The engine checks it once per nonce, before
/// hashing.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Clears the flag so the token can guard another search
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Single-threaded nonce search
pub struct NonceSearchEngine<R: RngCore = Xoshiro256PlusPlus> {
    device: DeviceProfile,
    algorithm: Arc<dyn Algorithm>,
    hardener: MemoryHardener<R>,
    observer: Box<dyn SearchObserver>,
    clock: Box<dyn Clock>,
    cancel: CancelToken,
    params: SearchParams,
}

impl<R: RngCore> NonceSearchEngine<R> {
    /// Creates an engine with a silent observer and the system clock
    ///
    /// # Arguments
    /// * `device` - Profile recorded in reports
    /// * `algorithm` - Hash pipeline evaluated per nonce
    /// * `hardener` - Owner of the scratch buffer; its size is reported as
    ///   the run's memory footprint
    pub fn new(device: DeviceProfile, algorithm: Arc<dyn Algorithm>, hardener: MemoryHardener<R>) -> Self {
        NonceSearchEngine {
            device,
            algorithm,
            hardener,
            observer: Box::new(NullObserver),
            clock: Box::new(SystemClock::new()),
            cancel: CancelToken::new(),
            params: SearchParams::default(),
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn SearchObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_params(mut self, params: SearchParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Handle that cancels searches run by this engine
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn device(&self) -> DeviceProfile {
        self.device
    }

    pub fn hardener(&self) -> &MemoryHardener<R> {
        &self.hardener
    }

    /// Searches `0..max_attempts` for a nonce solving `target`
    ///
    /// # Returns
    /// - `Ok(report)` for every terminal state: found, exhausted or cancelled
    /// - `Err(MinerError)` if the algorithm fails; the search stops at once
    ///
    /// `max_attempts` larger than the nonce space is clamped to
    /// [`NONCE_SPACE`].
    pub fn search(&mut self, header: &[u8], target: u32, max_attempts: u64) -> Result<MiningReport, MinerError> {
        let max_attempts = if max_attempts > NONCE_SPACE {
            log::warn!(
                "max_attempts {} exceeds the u32 nonce space, clamping to {}",
                max_attempts,
                NONCE_SPACE
            );
            NONCE_SPACE
        } else {
            max_attempts
        };
        let interval = u64::from(self.params.progress_interval.max(1));

        self.observer.on_start(self.device, target, max_attempts);
        let start = self.clock.now();

        for attempt in 0..max_attempts {
            if self.cancel.is_cancelled() {
                let report = self.finish(SearchOutcome::Cancelled, attempt, start);
                self.observer.on_cancelled(&report);
                return Ok(report);
            }

            // attempt < NONCE_SPACE, so this never truncates
            let nonce = attempt as u32;
            let digest = self.algorithm.digest(header, nonce)?;

            if meets_target(&digest, target) {
                let report = self.finish(SearchOutcome::Found { nonce, digest }, attempt + 1, start);
                self.observer.on_found(&report);
                return Ok(report);
            }

            if attempt > 0 && attempt % interval == 0 {
                self.hardener.harden(self.params.harden_rounds);

                let elapsed_seconds = self.elapsed_since(start).as_secs_f64();
                self.observer.on_progress(&Progress {
                    nonce,
                    attempts: attempt + 1,
                    elapsed_seconds,
                    hash_rate: hash_rate(attempt + 1, elapsed_seconds),
                });
            }
        }

        let report = self.finish(SearchOutcome::Exhausted, max_attempts, start);
        self.observer.on_exhausted(&report);
        Ok(report)
    }

    fn elapsed_since(&self, start: Duration) -> Duration {
        self.clock.now().saturating_sub(start)
    }

    fn finish(&self, outcome: SearchOutcome, attempts: u64, start: Duration) -> MiningReport {
        MiningReport::new(
            outcome,
            attempts,
            self.elapsed_since(start).as_secs_f64(),
            self.hardener.memory_kb(),
            self.device,
        )
    }
}
