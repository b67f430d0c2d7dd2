// src/miner/algorithm/pipeline.rs
//! Two-stage hash pipeline
//!
//! `digest = SHA-256(XXH3-128(header || nonce_be))`
//!
//! The XXH3 stage compresses an arbitrarily long header into 16 bytes
//! cheaply; SHA-256 then gives the digest its cryptographic distribution.

use crate::miner::algorithm::{Algorithm, DIGEST_LEN};
use crate::utils::error::MinerError;
use sha2::{Digest, Sha256};
use xxhash_rust::xxh3::xxh3_128;

/// Size of the pre-hash output fed into SHA-256
pub const INTERMEDIATE_LEN: usize = 16;

/// Production hash pipeline
///
/// Stateless; a single instance can be shared between any number of
/// engines.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashPipeline;

impl HashPipeline {
    /// Creates the pipeline
    pub fn new() -> Self {
        HashPipeline
    }

    /// Builds `header || nonce` with the nonce as 4 big-endian bytes
    pub fn preimage(header: &[u8], nonce: u32) -> Vec<u8> {
        let mut preimage = Vec::with_capacity(header.len() + 4);
        preimage.extend_from_slice(header);
        preimage.extend_from_slice(&nonce.to_be_bytes());
        preimage
    }

    /// Fast non-cryptographic stage
    pub fn pre_hash(preimage: &[u8]) -> [u8; INTERMEDIATE_LEN] {
        xxh3_128(preimage).to_be_bytes()
    }

    /// Cryptographic stage
    pub fn final_hash(intermediate: &[u8]) -> [u8; DIGEST_LEN] {
        Sha256::digest(intermediate).into()
    }
}

impl Algorithm for HashPipeline {
    fn digest(&self, header: &[u8], nonce: u32) -> Result<[u8; DIGEST_LEN], MinerError> {
        let preimage = Self::preimage(header, nonce);
        let intermediate = Self::pre_hash(&preimage);
        Ok(Self::final_hash(&intermediate))
    }

    fn name(&self) -> &'static str {
        "xxh3-sha256"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_preimage_appends_big_endian_nonce() {
        let preimage = HashPipeline::preimage(b"test", 0x0102_0304);
        assert_eq!(preimage, b"test\x01\x02\x03\x04");
    }

    #[test]
    fn test_preimage_empty_header() {
        assert_eq!(HashPipeline::preimage(&[], 42), vec![0, 0, 0, 42]);
    }

    #[test]
    fn test_final_hash_is_sha256() {
        assert_eq!(
            HashPipeline::final_hash(&[0u8; INTERMEDIATE_LEN]),
            hex!("374708fff7719dd5979ec875d56cd2286f6d3cf7ec317a3b25632aab28ec37bb")
        );
        assert_eq!(
            HashPipeline::final_hash(b"abc"),
            hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
    }

    #[test]
    fn test_digest_composes_stages_in_order() {
        let pipeline = HashPipeline::new();
        let expected = HashPipeline::final_hash(&HashPipeline::pre_hash(b"header\x00\x00\x00\x07"));
        assert_eq!(pipeline.digest(b"header", 7).unwrap(), expected);
    }

    #[test]
    fn test_digest_is_deterministic() {
        let pipeline = HashPipeline::new();
        let first = pipeline.digest(b"block template", 12345).unwrap();
        for _ in 0..10 {
            assert_eq!(pipeline.digest(b"block template", 12345).unwrap(), first);
        }
    }

    #[test]
    fn test_digest_depends_on_nonce_and_header() {
        let pipeline = HashPipeline::new();
        let base = pipeline.digest(b"test", 0).unwrap();
        assert_ne!(base, pipeline.digest(b"test", 1).unwrap());
        assert_ne!(base, pipeline.digest(b"tesT", 0).unwrap());
    }

    #[test]
    fn test_verify_extremes() {
        let pipeline = HashPipeline::new();
        assert!(!pipeline.verify(b"foo bar", 42, 0).unwrap());
        let digest = pipeline.digest(b"foo bar", 42).unwrap();
        let value = crate::miner::algorithm::leading_value(&digest);
        assert!(pipeline.verify(b"foo bar", 42, value.saturating_add(1)).unwrap() || value == u32::MAX);
        assert!(!pipeline.verify(b"foo bar", 42, value).unwrap());
    }
}
