// src/miner/observer.rs
//! Search event sinks
//!
//! The engine has no output of its own. Everything a user might want to
//! see while a search runs is delivered to a [`SearchObserver`].

use crate::stats::report::MiningReport;
use crate::types::DeviceProfile;
use crossbeam_channel::Sender;

/// Snapshot passed on every progress tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Nonce that triggered the tick
    pub nonce: u32,
    /// Nonces evaluated so far, including `nonce`
    pub attempts: u64,
    pub elapsed_seconds: f64,
    /// Rate so far; zero if no time has been measured yet
    pub hash_rate: f64,
}

/// Receiver of engine events
///
/// All methods default to doing nothing, so implementors only override
/// what they care about.
pub trait SearchObserver {
    fn on_start(&mut self, _device: DeviceProfile, _target: u32, _max_attempts: u64) {}

    fn on_progress(&mut self, _progress: &Progress) {}

    fn on_found(&mut self, _report: &MiningReport) {}

    fn on_exhausted(&mut self, _report: &MiningReport) {}

    fn on_cancelled(&mut self, _report: &MiningReport) {}
}

/// Observer that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl SearchObserver for NullObserver {}

/// Events forwarded by [`ChannelObserver`]
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    Started {
        device: DeviceProfile,
        target: u32,
        max_attempts: u64,
    },
    Progress(Progress),
    Found(MiningReport),
    Exhausted(MiningReport),
    Cancelled(MiningReport),
}

/// Observer that forwards events over a crossbeam channel
///
/// Sending never blocks the search; if the receiving side has gone away,
/// events are dropped.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: Sender<SearchEvent>,
}

impl ChannelObserver {
    pub fn new(sender: Sender<SearchEvent>) -> Self {
        ChannelObserver { sender }
    }

    fn emit(&self, event: SearchEvent) {
        let _ = self.sender.try_send(event);
    }
}

impl SearchObserver for ChannelObserver {
    fn on_start(&mut self, device: DeviceProfile, target: u32, max_attempts: u64) {
        self.emit(SearchEvent::Started {
            device,
            target,
            max_attempts,
        });
    }

    fn on_progress(&mut self, progress: &Progress) {
        self.emit(SearchEvent::Progress(*progress));
    }

    fn on_found(&mut self, report: &MiningReport) {
        self.emit(SearchEvent::Found(report.clone()));
    }

    fn on_exhausted(&mut self, report: &MiningReport) {
        self.emit(SearchEvent::Exhausted(report.clone()));
    }

    fn on_cancelled(&mut self, report: &MiningReport) {
        self.emit(SearchEvent::Cancelled(report.clone()));
    }
}
