// src/config/config.rs
use crate::miner::engine::{DEFAULT_HARDEN_ROUNDS, DEFAULT_PROGRESS_INTERVAL, SearchParams};
use crate::types::DeviceProfile;
use crate::utils::error::MinerError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for a batch of mining runs
///
/// Every field has a default, so an empty file (or no file at all) is a
/// valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Device profiles to mine under, one run each, in order
    /// (unknown names fall back to `default`)
    #[serde(default = "default_devices")]
    pub devices: Vec<DeviceProfile>,

    /// Header template as UTF-8 text
    #[serde(default = "default_header")]
    pub header: String,

    /// Header template as hex; takes precedence over `header`
    #[serde(default)]
    pub header_hex: Option<String>,

    /// Difficulty target: a digest wins when its first 4 bytes, read
    /// big-endian, are below this value
    #[serde(default = "default_target")]
    pub target: u32,

    /// Nonces tried per run before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u64,

    /// Seed for the memory hardener; omit for entropy-seeded runs
    #[serde(default)]
    pub seed: Option<u64>,

    /// Nonces between hardening passes and progress lines
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u32,

    /// Scratch windows perturbed per hardening pass
    #[serde(default = "default_harden_rounds")]
    pub harden_rounds: u32,

    /// Where the results file is written
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_devices() -> Vec<DeviceProfile> {
    DeviceProfile::ALL.to_vec()
}

fn default_header() -> String {
    "test".into()
}

fn default_target() -> u32 {
    0x00ff_ffff
}

fn default_max_attempts() -> u64 {
    100_000
}

fn default_progress_interval() -> u32 {
    DEFAULT_PROGRESS_INTERVAL
}

fn default_harden_rounds() -> u32 {
    DEFAULT_HARDEN_ROUNDS
}

fn default_output() -> PathBuf {
    PathBuf::from("mining_results.json")
}

impl Default for Config {
    fn default() -> Self {
        Config {
            devices: default_devices(),
            header: default_header(),
            header_hex: None,
            target: default_target(),
            max_attempts: default_max_attempts(),
            seed: None,
            progress_interval: default_progress_interval(),
            harden_rounds: default_harden_rounds(),
            output: default_output(),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Returns
    /// * `Ok(Config)` - Parsed configuration (not yet validated)
    /// * `Err(MinerError)` - If the file couldn't be read or parsed
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, MinerError> {
        let path = path.into();
        let config_str = std::fs::read_to_string(&path).map_err(|e| {
            MinerError::ConfigError(format!(
                "Failed to read config at {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::parse(&config_str)
    }

    /// Parses configuration from TOML text
    pub fn parse(config_str: &str) -> Result<Self, MinerError> {
        Ok(toml::from_str(config_str)?)
    }

    /// Rejects settings the engine cannot run with
    pub fn validate(&self) -> Result<(), MinerError> {
        if self.devices.is_empty() {
            return Err(MinerError::ConfigError("devices must list at least one profile".into()));
        }
        if self.progress_interval == 0 {
            return Err(MinerError::ConfigError("progress_interval must be greater than 0".into()));
        }
        if let Some(hex_header) = &self.header_hex {
            hex::decode(hex_header)?;
        }
        Ok(())
    }

    /// Header bytes to mine on
    pub fn header_bytes(&self) -> Result<Vec<u8>, MinerError> {
        match &self.header_hex {
            Some(hex_header) => Ok(hex::decode(hex_header)?),
            None => Ok(self.header.as_bytes().to_vec()),
        }
    }

    /// Engine tuning derived from this configuration
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            progress_interval: self.progress_interval,
            harden_rounds: self.harden_rounds,
        }
    }

    /// Generates a commented configuration template
    pub fn generate_template() -> String {
        let mut template = String::new();
        template.push_str("# Memory-hard miner configuration\n\n");
        template.push_str("# Device profiles to run, one search each: mobile, high-end, default\n");
        template.push_str("devices = [\"mobile\", \"high-end\", \"default\"]\n\n");
        template.push_str("# Header template (UTF-8). Set header_hex instead for raw bytes.\n");
        template.push_str("header = \"test\"\n");
        template.push_str("# header_hex = \"00000020deadbeef\"\n\n");
        template.push_str("# Difficulty target; smaller is harder\n");
        template.push_str("target = 0x00FFFFFF\n");
        template.push_str("# Nonces tried per device before giving up\n");
        template.push_str("max_attempts = 100000\n\n");
        template.push_str("# Fixed hardener seed for reproducible runs (omit for entropy)\n");
        template.push_str("# seed = 42\n\n");
        template.push_str("# Nonces between hardening passes and progress lines\n");
        template.push_str("progress_interval = 1000\n");
        template.push_str("# Scratch windows perturbed per hardening pass\n");
        template.push_str("harden_rounds = 1024\n\n");
        template.push_str("# Results file\n");
        template.push_str("output = \"mining_results.json\"\n");
        template
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let config = Config::parse(&Config::generate_template()).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
            devices = ["mobile", "tablet"]
            header_hex = "cafe"
            target = 0x0000FFFF
            max_attempts = 5000
            seed = 7
            progress_interval = 250
            harden_rounds = 16
            output = "out.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.devices, vec![DeviceProfile::Mobile, DeviceProfile::Default]);
        assert_eq!(config.header_bytes().unwrap(), vec![0xca, 0xfe]);
        assert_eq!(config.target, 0xffff);
        assert_eq!(config.max_attempts, 5000);
        assert_eq!(config.seed, Some(7));
        assert_eq!(
            config.search_params(),
            SearchParams { progress_interval: 250, harden_rounds: 16 }
        );
        assert_eq!(config.output, PathBuf::from("out.json"));
    }

    #[test]
    fn test_text_header() {
        let config = Config::default();
        assert_eq!(config.header_bytes().unwrap(), b"test".to_vec());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = Config { progress_interval: 0, ..Config::default() };
        assert!(matches!(config.validate(), Err(MinerError::ConfigError(_))));

        let config = Config { devices: vec![], ..Config::default() };
        assert!(config.validate().is_err());

        let config = Config { header_hex: Some("zz".into()), ..Config::default() };
        assert!(matches!(config.validate(), Err(MinerError::InputError(_))));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        assert!(matches!(Config::parse("target = \"high\""), Err(MinerError::ConfigError(_))));
        assert!(matches!(Config::parse("target = -1"), Err(MinerError::ConfigError(_))));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Config::load("/nonexistent/miner.toml").unwrap_err();
        assert!(matches!(err, MinerError::ConfigError(_)));
    }
}
