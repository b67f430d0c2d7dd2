// src/cli/commands.rs
use crate::config::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Memory-hard proof-of-work miner
#[derive(Parser, Debug)]
#[command(name = "memhard-miner")]
#[command(version, about, long_about = None)]
pub struct Commands {
    /// The action to perform (mine, benchmark, or generate config)
    #[command(subcommand)]
    pub action: Action,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Action {
    /// Mine once per device profile and write the results file
    Mine(MineOptions),

    /// Measure raw hash rate per device profile with an impossible target
    Benchmark(BenchmarkOptions),

    /// Generate configuration file template
    Config(ConfigOptions),
}

/// Options for a mining batch; flags override the config file
#[derive(Parser, Debug)]
pub struct MineOptions {
    /// Path to configuration file (defaults are used when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Device profiles, comma separated (mobile, high-end, default)
    #[arg(short, long, value_delimiter = ',')]
    pub devices: Vec<String>,

    /// Header template as UTF-8 text
    #[arg(long)]
    pub header: Option<String>,

    /// Header template as hex
    #[arg(long, conflicts_with = "header")]
    pub header_hex: Option<String>,

    /// Difficulty target, decimal or 0x-prefixed hex
    #[arg(short, long, value_parser = parse_target)]
    pub target: Option<u32>,

    /// Maximum nonces tried per device
    #[arg(short = 'n', long)]
    pub max_attempts: Option<u64>,

    /// Fixed seed for the memory hardener
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Results file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl MineOptions {
    /// Applies command-line overrides on top of a loaded config
    pub fn apply(&self, config: &mut Config) {
        if !self.devices.is_empty() {
            config.devices = self.devices.iter().map(|d| d.as_str().into()).collect();
        }
        if let Some(header) = &self.header {
            config.header = header.clone();
            config.header_hex = None;
        }
        if let Some(header_hex) = &self.header_hex {
            config.header_hex = Some(header_hex.clone());
        }
        if let Some(target) = self.target {
            config.target = target;
        }
        if let Some(max_attempts) = self.max_attempts {
            config.max_attempts = max_attempts;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
    }
}

/// Benchmark options
#[derive(Parser, Debug)]
pub struct BenchmarkOptions {
    /// Device profiles to benchmark, comma separated (all when omitted)
    #[arg(short, long, value_delimiter = ',')]
    pub devices: Vec<String>,

    /// Nonces hashed per profile
    #[arg(short = 'n', long, default_value_t = 100_000)]
    pub attempts: u64,

    /// Fixed seed for the memory hardener
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Options for generating configuration files
#[derive(Parser, Debug)]
pub struct ConfigOptions {
    /// Output file path
    #[arg(short, long, default_value = "miner.toml")]
    pub output: PathBuf,
}

/// Parses a target given as decimal or `0x`-prefixed hex
pub fn parse_target(s: &str) -> Result<u32, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex_digits) => u32::from_str_radix(hex_digits, 16),
        None => s.parse::<u32>(),
    };
    parsed.map_err(|e| format!("invalid target '{}': {}", s, e))
}
