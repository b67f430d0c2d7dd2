// src/utils/logging.rs
//! Logging setup for the miner binary
//!
//! The mining core never prints; everything user-facing goes through the
//! `log` facade and is rendered here by `env_logger`.

use env_logger::{Builder, Target};
use log::LevelFilter;
use std::env;

/// Initializes logging for a mining run
///
/// Info level unless `RUST_LOG` says otherwise. Progress ticks are logged
/// at info, so they show up by default.
pub fn init_logging() {
    init_with_default(LevelFilter::Info);
}

/// Initializes logging for benchmarks
///
/// Defaults to debug so per-profile timing details are visible.
pub fn init_bench_logging() {
    init_with_default(LevelFilter::Debug);
}

/// Builds the logger with `default_level`, letting `RUST_LOG` override it
///
/// Safe to call more than once; later calls are ignored.
fn init_with_default(default_level: LevelFilter) {
    let mut builder = common_log_config();

    if env::var("RUST_LOG").is_ok() {
        builder.parse_env("RUST_LOG");
    } else {
        builder.filter_level(default_level);
    }

    let _ = builder.try_init();
}

/// Base builder: `[ts level module:line] message` on stdout
fn common_log_config() -> Builder {
    let mut builder = Builder::new();

    builder
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{} {} {}:{}] {}",
                buf.timestamp_seconds(),
                record.level(),
                record.module_path().unwrap_or_default(),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(Target::Stdout);

    builder
}
