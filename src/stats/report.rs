// src/stats/report.rs
//! Mining report value object
//!
//! A [`MiningReport`] is built exactly once, at the end of a search, and is
//! never mutated afterwards. The hash rate is derived inside the
//! constructor so it always agrees with `attempts` and `elapsed_seconds`.

use crate::miner::algorithm::DIGEST_LEN;
use crate::types::DeviceProfile;
use serde::{Deserialize, Serialize};

/// Number of hex characters of the digest kept in persisted records
pub const HASH_PREFIX_LEN: usize = 16;

/// Terminal state of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SearchOutcome {
    /// A nonce whose digest is below the target
    Found {
        /// The winning nonce
        nonce: u32,
        /// Its full digest
        #[serde(with = "hex::serde")]
        digest: [u8; DIGEST_LEN],
    },
    /// Every nonce in `0..max_attempts` was tried without success
    Exhausted,
    /// The caller cancelled the search before it finished
    Cancelled,
}

/// Measured result of one mining run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiningReport {
    outcome: SearchOutcome,
    attempts: u64,
    elapsed_seconds: f64,
    hash_rate: f64,
    memory_kb: u32,
    device_type: DeviceProfile,
}

impl MiningReport {
    /// Builds a report, deriving the hash rate from `attempts / elapsed_seconds`
    pub fn new(
        outcome: SearchOutcome,
        attempts: u64,
        elapsed_seconds: f64,
        memory_kb: u32,
        device_type: DeviceProfile,
    ) -> Self {
        let elapsed_seconds = elapsed_seconds.max(0.0);
        MiningReport {
            outcome,
            attempts,
            elapsed_seconds,
            hash_rate: hash_rate(attempts, elapsed_seconds),
            memory_kb,
            device_type,
        }
    }

    pub fn outcome(&self) -> &SearchOutcome {
        &self.outcome
    }

    /// True only for [`SearchOutcome::Found`]
    pub fn success(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Found { .. })
    }

    pub fn cancelled(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Cancelled)
    }

    pub fn nonce(&self) -> Option<u32> {
        match self.outcome {
            SearchOutcome::Found { nonce, .. } => Some(nonce),
            _ => None,
        }
    }

    pub fn digest(&self) -> Option<&[u8; DIGEST_LEN]> {
        match &self.outcome {
            SearchOutcome::Found { digest, .. } => Some(digest),
            _ => None,
        }
    }

    /// Full lowercase hex of the winning digest
    pub fn digest_hex(&self) -> Option<String> {
        self.digest().map(hex::encode)
    }

    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    /// Hashes per second; zero when no time was measured
    pub fn hash_rate(&self) -> f64 {
        self.hash_rate
    }

    pub fn memory_kb(&self) -> u32 {
        self.memory_kb
    }

    pub fn device_type(&self) -> DeviceProfile {
        self.device_type
    }

    /// Flattens the report into the record written to result files
    pub fn to_record(&self) -> ResultRecord {
        ResultRecord {
            device: self.device_type,
            nonce: self.nonce(),
            hash: self
                .digest_hex()
                .map(|h| h[..HASH_PREFIX_LEN].to_string()),
            attempts: self.attempts,
            time_seconds: self.elapsed_seconds,
            true_hash_rate_hs: self.hash_rate,
            memory_kb: self.memory_kb,
        }
    }
}

/// `attempts / elapsed_seconds`, or 0 when elapsed time is not positive
pub fn hash_rate(attempts: u64, elapsed_seconds: f64) -> f64 {
    if elapsed_seconds > 0.0 {
        attempts as f64 / elapsed_seconds
    } else {
        0.0
    }
}

/// Flat per-run record persisted by [`crate::stats::ResultsWriter`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub device: DeviceProfile,
    pub nonce: Option<u32>,
    /// Leading hex characters of the digest
    pub hash: Option<String>,
    pub attempts: u64,
    pub time_seconds: f64,
    pub true_hash_rate_hs: f64,
    pub memory_kb: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(nonce: u32) -> SearchOutcome {
        let mut digest = [0xabu8; DIGEST_LEN];
        digest[..4].copy_from_slice(&[0, 0, 0, 1]);
        SearchOutcome::Found { nonce, digest }
    }

    #[test]
    fn test_found_accessors() {
        let report = MiningReport::new(found(42), 43, 0.5, 64, DeviceProfile::Mobile);
        assert!(report.success());
        assert!(!report.cancelled());
        assert_eq!(report.nonce(), Some(42));
        assert_eq!(report.attempts(), 43);
        assert_eq!(report.hash_rate(), 86.0);
        let hex = report.digest_hex().unwrap();
        assert_eq!(hex.len(), 64);
        assert!(hex.starts_with("00000001abab"));
    }

    #[test]
    fn test_exhausted_has_no_nonce_or_digest() {
        let report = MiningReport::new(SearchOutcome::Exhausted, 10000, 2.0, 128, DeviceProfile::Default);
        assert!(!report.success());
        assert_eq!(report.nonce(), None);
        assert_eq!(report.digest_hex(), None);
        assert_eq!(report.hash_rate(), 5000.0);
    }

    #[test]
    fn test_zero_elapsed_gives_zero_rate() {
        let report = MiningReport::new(SearchOutcome::Exhausted, 500, 0.0, 64, DeviceProfile::Mobile);
        assert_eq!(report.hash_rate(), 0.0);
        let negative = MiningReport::new(SearchOutcome::Exhausted, 500, -1.0, 64, DeviceProfile::Mobile);
        assert_eq!(negative.hash_rate(), 0.0);
        assert_eq!(negative.elapsed_seconds(), 0.0);
    }

    #[test]
    fn test_record_truncates_hash() {
        let record = MiningReport::new(found(7), 8, 1.0, 1024, DeviceProfile::HighEnd).to_record();
        assert_eq!(record.device, DeviceProfile::HighEnd);
        assert_eq!(record.nonce, Some(7));
        assert_eq!(record.hash.as_deref(), Some("00000001abababab"));
        assert_eq!(record.true_hash_rate_hs, 8.0);
        assert_eq!(record.memory_kb, 1024);
    }

    #[test]
    fn test_record_for_failed_run() {
        let record = MiningReport::new(SearchOutcome::Cancelled, 3, 1.0, 64, DeviceProfile::Mobile).to_record();
        assert_eq!(record.nonce, None);
        assert_eq!(record.hash, None);
        assert_eq!(record.attempts, 3);
    }

    #[test]
    fn test_report_serializes_outcome_tag() {
        let report = MiningReport::new(found(1), 2, 1.0, 64, DeviceProfile::Mobile);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcome"]["status"], "found");
        assert_eq!(json["outcome"]["nonce"], 1);
        assert_eq!(json["device_type"], "mobile");
    }
}
