// src/miner/algorithm/mod.rs
//! Hash algorithms and the target rule
//!
//! The search engine only talks to the [`Algorithm`] trait, so the
//! production pipeline can be swapped for deterministic stubs in tests.

/// XXH3 + SHA-256 hash pipeline
///
/// The production algorithm: a fast non-cryptographic pre-hash over
/// `header || nonce` followed by SHA-256 over the pre-hash output.
pub mod pipeline;

pub use pipeline::HashPipeline;

use crate::utils::error::MinerError;

/// Length in bytes of every digest an [`Algorithm`] produces
pub const DIGEST_LEN: usize = 32;

/// Common interface for mining hash algorithms
pub trait Algorithm: Send + Sync {
    /// Compute the digest for a header and nonce
    ///
    /// # Arguments
    /// * `header` - The block header template (without nonce)
    /// * `nonce` - The nonce to append, serialized big-endian
    ///
    /// # Returns
    /// 32-byte digest, or [`MinerError::HashingFailure`] if the underlying
    /// primitive is unusable. Callers must treat that error as fatal.
    fn digest(&self, header: &[u8], nonce: u32) -> Result<[u8; DIGEST_LEN], MinerError>;

    /// Check whether `nonce` solves `header` for `target`
    fn verify(&self, header: &[u8], nonce: u32, target: u32) -> Result<bool, MinerError> {
        let digest = self.digest(header, nonce)?;
        Ok(meets_target(&digest, target))
    }

    /// Short identifier used in logs
    fn name(&self) -> &'static str;
}

/// Numeric value of a digest: its first 4 bytes read big-endian
pub fn leading_value(digest: &[u8; DIGEST_LEN]) -> u32 {
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// A digest solves the target when its leading value is strictly below it
pub fn meets_target(digest: &[u8; DIGEST_LEN], target: u32) -> bool {
    leading_value(digest) < target
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_leading_value_is_big_endian() {
        let digest = hex!("0a0b0c0d ffffffff ffffffff ffffffff ffffffff ffffffff ffffffff ffffffff");
        assert_eq!(leading_value(&digest), 0x0a0b0c0d);
    }

    #[test]
    fn test_target_comparison_is_strict() {
        let mut digest = [0u8; DIGEST_LEN];
        digest[..4].copy_from_slice(&0x00ff_ffffu32.to_be_bytes());
        assert!(!meets_target(&digest, 0x00ff_ffff));
        assert!(meets_target(&digest, 0x0100_0000));
    }

    #[test]
    fn test_zero_target_never_met() {
        assert!(!meets_target(&[0u8; DIGEST_LEN], 0));
    }

    #[test]
    fn test_max_target_met_below_max() {
        assert!(meets_target(&[0u8; DIGEST_LEN], u32::MAX));
        assert!(!meets_target(&[0xffu8; DIGEST_LEN], u32::MAX));
    }
}
