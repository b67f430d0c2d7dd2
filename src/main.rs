// src/main.rs
use clap::Parser;
use memhard_miner_rs::cli::{Action, BenchmarkOptions, ConfigOptions, MineOptions};
use memhard_miner_rs::miner::{CancelToken, NullObserver, SearchObserver, Worker, run_batch};
use memhard_miner_rs::stats::{LogObserver, ResultsWriter, StatsReporter};
use memhard_miner_rs::utils::{init_bench_logging, init_logging};
use memhard_miner_rs::{Commands, Config, DeviceProfile, MinerError, config};

/// Main entry point
///
/// Parses command line arguments and dispatches to the subcommand handler.
fn main() -> Result<(), MinerError> {
    let cli = Commands::parse();

    match cli.action {
        Action::Mine(opts) => run_mining(opts),
        Action::Benchmark(opts) => run_benchmark(opts),
        Action::Config(opts) => generate_config(opts),
    }
}

/// Mines once per configured device profile and saves the results
///
/// # Operations
/// 1. Initializes logging
/// 2. Loads the config file (if any) and applies CLI overrides
/// 3. Runs the batch with a logging observer per profile
/// 4. Logs a summary and writes the results file
fn run_mining(opts: MineOptions) -> Result<(), MinerError> {
    init_logging();

    let mut config = match &opts.config {
        Some(path) => config::load(path)?,
        None => Config::default(),
    };
    opts.apply(&mut config);
    config.validate()?;

    let header = config.header_bytes()?;
    log::info!(
        "Mining {} byte header on {} profile(s), target={:#010x}, max_attempts={}",
        header.len(),
        config.devices.len(),
        config.target,
        config.max_attempts
    );

    let reports = run_batch(&config, &header, &CancelToken::new(), |_| {
        Box::new(LogObserver::new()) as Box<dyn SearchObserver>
    })?;

    StatsReporter::log_summary(&reports);

    let writer = ResultsWriter::new(&config.output);
    writer.write_reports(&reports)?;
    log::info!("Results saved to {}", writer.path().display());

    Ok(())
}

/// Measures raw hash rate per profile
///
/// Uses target 0 so every run hashes exactly `attempts` nonces, then logs
/// the rate and the process memory after each profile.
fn run_benchmark(opts: BenchmarkOptions) -> Result<(), MinerError> {
    init_bench_logging();

    let devices: Vec<DeviceProfile> = if opts.devices.is_empty() {
        DeviceProfile::ALL.to_vec()
    } else {
        opts.devices.iter().map(|d| d.as_str().into()).collect()
    };

    log::info!(
        "Benchmarking {} profile(s) for {} attempts each",
        devices.len(),
        opts.attempts
    );

    let mut reporter = StatsReporter::new();
    let mut reports = Vec::with_capacity(devices.len());

    for device in devices {
        let worker = match opts.seed {
            Some(seed) => Worker::with_seed(device, seed),
            None => Worker::new(device),
        };
        let mut worker = worker.with_observer(Box::new(NullObserver));

        let report = worker.mine(&[0u8; 76], 0, opts.attempts)?;
        let hw = reporter.hardware_stats();
        log::debug!(
            "{}: scratch {} KB, process RSS {} KB, host {}/{} KB",
            device,
            report.memory_kb(),
            hw.process_memory_kb,
            hw.system_used_kb,
            hw.system_total_kb
        );
        reports.push(report);
    }

    log::info!("Benchmark results:");
    StatsReporter::log_summary(&reports);
    log::logger().flush();

    Ok(())
}

/// Writes a commented configuration template
fn generate_config(opts: ConfigOptions) -> Result<(), MinerError> {
    std::fs::write(&opts.output, config::generate_template())?;
    println!("Configuration template written to {}", opts.output.display());
    Ok(())
}
