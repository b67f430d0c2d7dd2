// src/stats/reporter.rs
use crate::miner::observer::{Progress, SearchObserver};
use crate::stats::report::{MiningReport, hash_rate};
use crate::types::DeviceProfile;
use sysinfo::{ProcessesToUpdate, System};

/// Aggregate statistics over a batch of reports
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MiningStats {
    /// Number of runs summarized
    pub runs: usize,
    /// Runs that found a nonce
    pub solved: usize,
    /// Hashes computed across all runs
    pub hashes_total: u64,
    /// Wall-clock seconds across all runs
    pub seconds_total: f64,
    /// `hashes_total / seconds_total`
    pub avg_hashrate: f64,
    /// Profile with the highest single-run hash rate
    pub fastest_device: Option<DeviceProfile>,
}

/// Memory figures for the current process and host
#[derive(Debug, Clone, Copy, Default)]
pub struct HardwareStats {
    /// Resident memory of this process in KiB (0 if unavailable)
    pub process_memory_kb: u64,
    /// Memory in use on the host, in KiB
    pub system_used_kb: u64,
    /// Total host memory, in KiB
    pub system_total_kb: u64,
}

/// Summarizes mining results and samples host memory
pub struct StatsReporter {
    system: System,
}

impl StatsReporter {
    pub fn new() -> Self {
        StatsReporter {
            system: System::new(),
        }
    }

    /// Folds reports into batch totals
    pub fn summarize(reports: &[MiningReport]) -> MiningStats {
        let hashes_total: u64 = reports.iter().map(MiningReport::attempts).sum();
        let seconds_total: f64 = reports.iter().map(MiningReport::elapsed_seconds).sum();
        let fastest_device = reports
            .iter()
            .max_by(|a, b| a.hash_rate().total_cmp(&b.hash_rate()))
            .map(MiningReport::device_type);

        MiningStats {
            runs: reports.len(),
            solved: reports.iter().filter(|r| r.success()).count(),
            hashes_total,
            seconds_total,
            avg_hashrate: hash_rate(hashes_total, seconds_total),
            fastest_device,
        }
    }

    /// Refreshes and returns memory usage
    pub fn hardware_stats(&mut self) -> HardwareStats {
        self.system.refresh_memory();

        let process_memory_kb = match sysinfo::get_current_pid() {
            Ok(pid) => {
                self.system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
                self.system.process(pid).map(|p| p.memory() / 1024).unwrap_or(0)
            }
            Err(e) => {
                log::debug!("Process memory unavailable: {}", e);
                0
            }
        };

        HardwareStats {
            process_memory_kb,
            system_used_kb: self.system.used_memory() / 1024,
            system_total_kb: self.system.total_memory() / 1024,
        }
    }

    /// Logs one line per run followed by the batch totals
    pub fn log_summary(reports: &[MiningReport]) {
        for report in reports {
            match report.nonce() {
                Some(nonce) => log::info!(
                    "{:<8} | nonce {:>10} | {:>10} attempts | {:>8.3}s | {:>12.2} H/s | {:>5} KB",
                    report.device_type(),
                    nonce,
                    report.attempts(),
                    report.elapsed_seconds(),
                    report.hash_rate(),
                    report.memory_kb()
                ),
                None => log::info!(
                    "{:<8} | {:>16} | {:>10} attempts | {:>8.3}s | {:>12.2} H/s | {:>5} KB",
                    report.device_type(),
                    if report.cancelled() { "cancelled" } else { "no solution" },
                    report.attempts(),
                    report.elapsed_seconds(),
                    report.hash_rate(),
                    report.memory_kb()
                ),
            }
        }

        let stats = Self::summarize(reports);
        log::info!(
            "Solved {}/{} | Total hashes: {} | Average hashrate: {:.2} H/s",
            stats.solved,
            stats.runs,
            stats.hashes_total,
            stats.avg_hashrate
        );
        if let Some(device) = stats.fastest_device {
            log::info!("Fastest profile: {}", device);
        }
    }
}

impl Default for StatsReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer that turns search events into log lines
#[derive(Debug, Default)]
pub struct LogObserver {
    device: Option<DeviceProfile>,
}

impl LogObserver {
    pub fn new() -> Self {
        Self::default()
    }

    fn label(&self) -> String {
        self.device.map(|d| d.to_string()).unwrap_or_default()
    }
}

impl SearchObserver for LogObserver {
    fn on_start(&mut self, device: DeviceProfile, target: u32, max_attempts: u64) {
        self.device = Some(device);
        log::info!(
            "[{}] Mining started: target={:#010x} max_attempts={} scratch={} bytes",
            device,
            target,
            max_attempts,
            device.scratch_bytes()
        );
    }

    fn on_progress(&mut self, progress: &Progress) {
        log::info!(
            "[{}] Attempts: {} | Rate: {:.2} H/s",
            self.label(),
            progress.attempts,
            progress.hash_rate
        );
    }

    fn on_found(&mut self, report: &MiningReport) {
        log::info!(
            "[{}] Found nonce {} after {} attempts in {:.3}s ({:.2} H/s) hash={}",
            self.label(),
            report.nonce().unwrap_or_default(),
            report.attempts(),
            report.elapsed_seconds(),
            report.hash_rate(),
            report.digest_hex().unwrap_or_default()
        );
    }

    fn on_exhausted(&mut self, report: &MiningReport) {
        log::warn!(
            "[{}] No nonce found within {} attempts ({:.3}s, {:.2} H/s)",
            self.label(),
            report.attempts(),
            report.elapsed_seconds(),
            report.hash_rate()
        );
    }

    fn on_cancelled(&mut self, report: &MiningReport) {
        log::warn!("[{}] Search cancelled after {} attempts", self.label(), report.attempts());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::report::SearchOutcome;

    fn report(device: DeviceProfile, outcome: SearchOutcome, attempts: u64, secs: f64) -> MiningReport {
        MiningReport::new(outcome, attempts, secs, (device.scratch_bytes() / 1024) as u32, device)
    }

    #[test]
    fn test_summarize_batch() {
        let reports = vec![
            report(DeviceProfile::Mobile, SearchOutcome::Found { nonce: 9, digest: [0; 32] }, 10, 1.0),
            report(DeviceProfile::HighEnd, SearchOutcome::Exhausted, 300, 1.0),
            report(DeviceProfile::Default, SearchOutcome::Cancelled, 90, 2.0),
        ];
        let stats = StatsReporter::summarize(&reports);

        assert_eq!(stats.runs, 3);
        assert_eq!(stats.solved, 1);
        assert_eq!(stats.hashes_total, 400);
        assert_eq!(stats.seconds_total, 4.0);
        assert_eq!(stats.avg_hashrate, 100.0);
        assert_eq!(stats.fastest_device, Some(DeviceProfile::HighEnd));
    }

    #[test]
    fn test_summarize_empty() {
        let stats = StatsReporter::summarize(&[]);
        assert_eq!(stats, MiningStats::default());
    }

    #[test]
    fn test_hardware_stats_sees_host_memory() {
        let stats = StatsReporter::new().hardware_stats();
        assert!(stats.system_total_kb > 0);
        assert!(stats.system_used_kb <= stats.system_total_kb);
    }
}
