// src/stats/results.rs
//! Results file persistence
//!
//! Writes a batch of runs as a pretty-printed JSON array of flat
//! [`ResultRecord`]s, in run order.

use crate::stats::report::{MiningReport, ResultRecord};
use crate::utils::error::MinerError;
use std::path::{Path, PathBuf};

/// Reads and writes a results file
#[derive(Debug, Clone)]
pub struct ResultsWriter {
    path: PathBuf,
}

impl ResultsWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ResultsWriter { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the file with `records`
    pub fn write(&self, records: &[ResultRecord]) -> Result<(), MinerError> {
        let json = serde_json::to_string_pretty(records)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Flattens and writes reports
    pub fn write_reports(&self, reports: &[MiningReport]) -> Result<(), MinerError> {
        let records: Vec<ResultRecord> = reports.iter().map(MiningReport::to_record).collect();
        self.write(&records)
    }

    /// Reads records back
    pub fn load(&self) -> Result<Vec<ResultRecord>, MinerError> {
        let json = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
