// src/miner/hardener.rs
//! Scratch-buffer memory hardening
//!
//! The hardener owns a zeroed scratch buffer sized by the device profile
//! and, on request, XORs randomly placed 64-byte windows of it with a fixed
//! pattern. The buffer does not feed the hash pipeline; its only job is to
//! make each search pay a memory-bandwidth cost proportional to the profile.

use crate::types::DeviceProfile;
use rand::{Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Width of each perturbed window in bytes
pub const HARDEN_WINDOW: usize = 64;

/// Byte every window is XORed with
pub const HARDEN_PATTERN: u8 = 0x55;

/// Owner of the scratch buffer
///
/// Generic over the random source so tests can run fully reproducible
/// hardening while production seeds from system entropy.
pub struct MemoryHardener<R: RngCore = Xoshiro256PlusPlus> {
    scratch: Vec<u8>,
    rng: R,
}

impl MemoryHardener<Xoshiro256PlusPlus> {
    /// Hardener with a reproducible Xoshiro256++ stream
    pub fn seeded(profile: DeviceProfile, seed: u64) -> Self {
        Self::with_rng(profile, Xoshiro256PlusPlus::seed_from_u64(seed))
    }

    /// Hardener seeded from operating-system entropy
    pub fn from_entropy(profile: DeviceProfile) -> Self {
        Self::with_rng(profile, Xoshiro256PlusPlus::from_entropy())
    }
}

impl<R: RngCore> MemoryHardener<R> {
    /// Allocates the profile's scratch buffer and takes ownership of `rng`
    pub fn with_rng(profile: DeviceProfile, rng: R) -> Self {
        Self::with_len(profile.scratch_bytes(), rng)
    }

    /// Allocates a scratch buffer of exactly `len` bytes
    pub fn with_len(len: usize, rng: R) -> Self {
        MemoryHardener {
            scratch: vec![0u8; len],
            rng,
        }
    }

    /// Perturbs `rounds` random windows of the scratch buffer
    ///
    /// Offsets are drawn uniformly from `[0, len - 64)`. When that range is
    /// empty (buffers of 64 bytes or less) nothing happens.
    pub fn harden(&mut self, rounds: u32) {
        if self.scratch.len() <= HARDEN_WINDOW {
            return;
        }
        let offsets = self.scratch.len() - HARDEN_WINDOW;

        for _ in 0..rounds {
            let offset = self.rng.gen_range(0..offsets);
            self.scratch[offset..offset + HARDEN_WINDOW]
                .iter_mut()
                .for_each(|byte| *byte ^= HARDEN_PATTERN);
        }
    }

    /// Read-only view of the scratch buffer
    pub fn scratch(&self) -> &[u8] {
        &self.scratch
    }

    /// Scratch length in bytes
    pub fn len(&self) -> usize {
        self.scratch.len()
    }

    /// True for a zero-length scratch buffer
    pub fn is_empty(&self) -> bool {
        self.scratch.is_empty()
    }

    /// Scratch size in whole KiB, as reported in mining results
    pub fn memory_kb(&self) -> u32 {
        u32::try_from(self.scratch.len() / 1024).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_sized_by_profile_and_zeroed() {
        let hardener = MemoryHardener::seeded(DeviceProfile::Mobile, 1);
        assert_eq!(hardener.len(), 65536);
        assert_eq!(hardener.memory_kb(), 64);
        assert!(hardener.scratch().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_small_buffers_are_noop() {
        for len in [0, 1, 63, 64] {
            let mut hardener = MemoryHardener::with_len(len, Xoshiro256PlusPlus::seed_from_u64(3));
            hardener.harden(1024);
            assert_eq!(hardener.len(), len);
            assert!(hardener.scratch().iter().all(|&b| b == 0), "len {} changed", len);
        }
    }

    #[test]
    fn test_single_offset_buffer_touches_only_first_window() {
        // len 65 leaves exactly one legal offset: 0
        let mut hardener = MemoryHardener::with_len(65, Xoshiro256PlusPlus::seed_from_u64(9));
        hardener.harden(1);
        assert!(hardener.scratch()[..HARDEN_WINDOW].iter().all(|&b| b == HARDEN_PATTERN));
        assert_eq!(hardener.scratch()[HARDEN_WINDOW], 0);
    }

    #[test]
    fn test_one_round_flips_one_contiguous_window() {
        let mut hardener = MemoryHardener::seeded(DeviceProfile::Mobile, 77);
        hardener.harden(1);

        let touched: Vec<usize> = hardener
            .scratch()
            .iter()
            .enumerate()
            .filter(|(_, b)| **b != 0)
            .map(|(i, _)| i)
            .collect();

        assert_eq!(touched.len(), HARDEN_WINDOW);
        let first = touched[0];
        assert!(first < hardener.len() - HARDEN_WINDOW);
        assert_eq!(touched, (first..first + HARDEN_WINDOW).collect::<Vec<_>>());
        assert!(touched.iter().all(|&i| hardener.scratch()[i] == HARDEN_PATTERN));
    }

    #[test]
    fn test_last_byte_never_touched() {
        // offsets stop one short of len - 64, so the final byte stays clean
        let mut hardener = MemoryHardener::with_len(256, Xoshiro256PlusPlus::seed_from_u64(5));
        for _ in 0..64 {
            hardener.harden(1);
            assert_eq!(hardener.scratch()[255], 0);
        }
    }

    #[test]
    fn test_same_seed_same_buffer() {
        let mut a = MemoryHardener::seeded(DeviceProfile::Default, 1234);
        let mut b = MemoryHardener::seeded(DeviceProfile::Default, 1234);
        a.harden(1024);
        b.harden(1024);
        assert_eq!(a.scratch(), b.scratch());

        let mut c = MemoryHardener::seeded(DeviceProfile::Default, 4321);
        c.harden(1024);
        assert_ne!(a.scratch(), c.scratch());
    }
}
