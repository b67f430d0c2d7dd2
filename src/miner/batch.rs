// src/miner/batch.rs
//! Sequential batch of mining runs
//!
//! One [`Worker`] per configured device profile, run back to back on the
//! calling thread. A shared cancel token stops the current run and skips
//! the rest.

use crate::config::Config;
use crate::miner::engine::CancelToken;
use crate::miner::observer::SearchObserver;
use crate::miner::worker::Worker;
use crate::stats::report::MiningReport;
use crate::types::DeviceProfile;
use crate::utils::error::MinerError;

/// Runs the configured search once per device profile
///
/// # Arguments
/// * `config` - Devices, target, attempts and tuning
/// * `header` - Header bytes shared by every run
/// * `cancel` - Stops the batch; the cancelled run is still reported
/// * `observer_for` - Builds the observer attached to each run
///
/// # Returns
/// Reports in device order, or the first hashing error
pub fn run_batch<F>(
    config: &Config,
    header: &[u8],
    cancel: &CancelToken,
    mut observer_for: F,
) -> Result<Vec<MiningReport>, MinerError>
where
    F: FnMut(DeviceProfile) -> Box<dyn SearchObserver>,
{
    let mut reports = Vec::with_capacity(config.devices.len());

    for &device in &config.devices {
        if cancel.is_cancelled() {
            log::warn!("Batch cancelled, skipping remaining profiles");
            break;
        }

        let mut worker = Worker::from_config(config, device)
            .with_observer(observer_for(device))
            .with_cancel_token(cancel.clone());
        reports.push(worker.mine(header, config.target, config.max_attempts)?);
    }

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::miner::observer::NullObserver;

    fn quiet(_: DeviceProfile) -> Box<dyn SearchObserver> {
        Box::new(NullObserver)
    }

    #[test]
    fn test_one_report_per_device_in_order() {
        let config = Config {
            devices: vec![DeviceProfile::HighEnd, DeviceProfile::Mobile],
            max_attempts: 200,
            target: 0,
            seed: Some(1),
            ..Config::default()
        };
        let reports = run_batch(&config, b"test", &CancelToken::new(), quiet).unwrap();

        let devices: Vec<_> = reports.iter().map(|r| r.device_type()).collect();
        assert_eq!(devices, vec![DeviceProfile::HighEnd, DeviceProfile::Mobile]);
        assert!(reports.iter().all(|r| !r.success() && r.attempts() == 200));
    }

    #[test]
    fn test_cancelled_batch_runs_nothing() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let reports = run_batch(&Config::default(), b"test", &cancel, quiet).unwrap();
        assert!(reports.is_empty());
    }
}
