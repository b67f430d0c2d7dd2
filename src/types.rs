// src/types.rs
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Memory profiles the miner can run under
///
/// A profile only decides how large the scratch buffer owned by the
/// memory hardener is. Profiles are parsed leniently: any name that is not
/// recognised resolves to [`DeviceProfile::Default`] with a warning instead
/// of failing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeviceProfile {
    /// Phones and other constrained devices
    ///
    /// 64 KiB of scratch, small enough to stay inside a mobile L2 cache.
    Mobile,

    /// Desktops and servers with large caches
    ///
    /// 1 MiB of scratch.
    HighEnd,

    /// Fallback profile, also used for unrecognised names
    ///
    /// 128 KiB of scratch.
    Default,
}

impl DeviceProfile {
    /// Every profile, in the order batch runs visit them by default
    pub const ALL: [DeviceProfile; 3] = [
        DeviceProfile::Mobile,
        DeviceProfile::HighEnd,
        DeviceProfile::Default,
    ];

    /// Scratch buffer size in bytes for this profile
    pub const fn scratch_bytes(self) -> usize {
        match self {
            DeviceProfile::Mobile => 64 * 1024,
            DeviceProfile::HighEnd => 1024 * 1024,
            DeviceProfile::Default => 128 * 1024,
        }
    }

    /// Canonical lowercase name, as written to configs and result files
    pub const fn name(self) -> &'static str {
        match self {
            DeviceProfile::Mobile => "mobile",
            DeviceProfile::HighEnd => "high-end",
            DeviceProfile::Default => "default",
        }
    }

    /// Resolves a profile name, falling back to [`DeviceProfile::Default`]
    ///
    /// Matching ignores case and surrounding whitespace. `high_end` and
    /// `highend` are accepted as aliases of `high-end`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "mobile" => DeviceProfile::Mobile,
            "high-end" | "high_end" | "highend" => DeviceProfile::HighEnd,
            "default" => DeviceProfile::Default,
            other => {
                log::warn!(
                    "Unknown device profile '{}', falling back to default ({} bytes)",
                    other,
                    DeviceProfile::Default.scratch_bytes()
                );
                DeviceProfile::Default
            }
        }
    }
}

impl Default for DeviceProfile {
    fn default() -> Self {
        DeviceProfile::Default
    }
}

impl fmt::Display for DeviceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DeviceProfile {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DeviceProfile::from_name(s))
    }
}

impl From<&str> for DeviceProfile {
    fn from(name: &str) -> Self {
        DeviceProfile::from_name(name)
    }
}

impl From<String> for DeviceProfile {
    fn from(name: String) -> Self {
        DeviceProfile::from_name(&name)
    }
}

impl From<DeviceProfile> for String {
    fn from(profile: DeviceProfile) -> Self {
        profile.name().to_string()
    }
}
