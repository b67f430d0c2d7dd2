//! Mining results: the report value object, batch summaries and the
//! results file
//!
//! [`MiningReport`] is what the engine returns. Everything else here
//! consumes reports: [`StatsReporter`] for console summaries and host
//! memory, [`ResultsWriter`] for persistence and [`LogObserver`] for live
//! progress lines.

/// Report value object and its persisted record form
pub mod report;

/// Summaries, host memory sampling and the logging observer
pub mod reporter;

/// JSON results file
pub mod results;

pub use report::{MiningReport, ResultRecord, SearchOutcome};
pub use reporter::{HardwareStats, LogObserver, MiningStats, StatsReporter};
pub use results::ResultsWriter;
