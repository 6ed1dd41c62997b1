//! Apple platform types, configuration distinguishers and cpu naming.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix carried by iOS values of the generic `--cpu` option.
pub const IOS_CPU_PREFIX: &str = "ios_";

/// iOS architecture used when the generic cpu is not an iOS cpu.
pub const DEFAULT_IOS_CPU: &str = "x86_64";

/// Derive the iOS architecture from a generic cpu value.
///
/// `ios_arm64` maps to `arm64`; any cpu without the `ios_` prefix maps to
/// [`DEFAULT_IOS_CPU`].
pub fn ios_cpu_from_cpu(cpu: &str) -> &str {
    cpu.strip_prefix(IOS_CPU_PREFIX).unwrap_or(DEFAULT_IOS_CPU)
}

/// Apple platform a target is built for.
///
/// Configuration data may name a platform this crate does not know about;
/// such values are kept as [`ApplePlatformType::Other`] so that the consumer
/// decides how to reject them.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum ApplePlatformType {
    #[default]
    Ios,
    Watchos,
    Tvos,
    Macos,
    Other(String),
}

impl ApplePlatformType {
    /// The four recognized platforms.
    pub const KNOWN: [ApplePlatformType; 4] = [
        ApplePlatformType::Ios,
        ApplePlatformType::Watchos,
        ApplePlatformType::Tvos,
        ApplePlatformType::Macos,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ApplePlatformType::Ios => "ios",
            ApplePlatformType::Watchos => "watchos",
            ApplePlatformType::Tvos => "tvos",
            ApplePlatformType::Macos => "macos",
            ApplePlatformType::Other(name) => name,
        }
    }

    /// Distinguisher used by multi-architecture splits targeting this platform.
    pub fn split_distinguisher(&self) -> Option<ConfigurationDistinguisher> {
        match self {
            ApplePlatformType::Ios => Some(ConfigurationDistinguisher::AppleBinIos),
            ApplePlatformType::Watchos => Some(ConfigurationDistinguisher::AppleBinWatchos),
            ApplePlatformType::Tvos => Some(ConfigurationDistinguisher::AppleBinTvos),
            ApplePlatformType::Macos => Some(ConfigurationDistinguisher::AppleBinMacos),
            ApplePlatformType::Other(_) => None,
        }
    }
}

impl From<&str> for ApplePlatformType {
    fn from(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "ios" => ApplePlatformType::Ios,
            "watchos" => ApplePlatformType::Watchos,
            "tvos" => ApplePlatformType::Tvos,
            "macos" => ApplePlatformType::Macos,
            _ => ApplePlatformType::Other(value.to_string()),
        }
    }
}

impl From<String> for ApplePlatformType {
    fn from(value: String) -> Self {
        ApplePlatformType::from(value.as_str())
    }
}

impl From<ApplePlatformType> for String {
    fn from(value: ApplePlatformType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ApplePlatformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag that keeps otherwise-identical configurations apart in the build graph.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ConfigurationDistinguisher {
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "apple_crosstool")]
    AppleCrosstool,
    #[serde(rename = "applebin_ios")]
    AppleBinIos,
    #[serde(rename = "applebin_watchos")]
    AppleBinWatchos,
    #[serde(rename = "applebin_tvos")]
    AppleBinTvos,
    #[serde(rename = "applebin_macos")]
    AppleBinMacos,
}

impl ConfigurationDistinguisher {
    /// Whether this is the default, unset distinguisher.
    pub fn is_unknown(self) -> bool {
        self == ConfigurationDistinguisher::Unknown
    }
}
