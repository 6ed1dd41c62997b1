//! Apple platform options.

use serde::{Deserialize, Serialize};

use crate::platform::{ApplePlatformType, ConfigurationDistinguisher};
use crate::DEFAULT_CROSSTOOL_TOP;

/// Options controlling Apple-platform builds and the Apple crosstool transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppleOptions {
    /// Platform the target is built for (`--apple_platform_type`).
    pub platform_type: ApplePlatformType,

    /// Architecture of the current split branch (`--apple_split_cpu`).
    /// Empty is treated the same as unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_cpu: Option<String>,

    /// `--ios_multi_cpus`
    pub ios_multi_cpus: Vec<String>,

    /// `--watchos_cpus`
    pub watchos_cpus: Vec<String>,

    /// `--tvos_cpus`
    pub tvos_cpus: Vec<String>,

    /// `--macos_cpus`
    pub macos_cpus: Vec<String>,

    /// Encode the crosstool in the output directory name instead of relying on
    /// the distinguisher alone (`--apple_crosstool_in_output_directory_name`).
    pub crosstool_in_output_directory_name: bool,

    /// Apply the crosstool transition to every Apple target
    /// (`--enable_apple_crosstool_transition`).
    pub enable_apple_crosstool_transition: bool,

    /// Distinguisher set by Apple transitions; never set on the command line.
    pub configuration_distinguisher: ConfigurationDistinguisher,

    /// Crosstool used for Apple targets (`--apple_crosstool_top`).
    pub crosstool_top: String,

    /// Set once a configuration has been moved onto the Apple crosstool.
    pub target_uses_apple_crosstool: bool,
}

impl Default for AppleOptions {
    fn default() -> Self {
        Self {
            platform_type: ApplePlatformType::Ios,
            split_cpu: None,
            ios_multi_cpus: Vec::new(),
            watchos_cpus: vec!["armv7k".to_string()],
            tvos_cpus: vec!["x86_64".to_string()],
            macos_cpus: vec!["x86_64".to_string()],
            crosstool_in_output_directory_name: false,
            enable_apple_crosstool_transition: true,
            configuration_distinguisher: ConfigurationDistinguisher::Unknown,
            crosstool_top: DEFAULT_CROSSTOOL_TOP.to_string(),
            target_uses_apple_crosstool: false,
        }
    }
}

impl AppleOptions {
    /// The split cpu, if set to a non-empty value.
    pub fn split_cpu(&self) -> Option<&str> {
        self.split_cpu.as_deref().filter(|cpu| !cpu.is_empty())
    }

    /// Multi-architecture list for `platform`, with the option it is read from.
    ///
    /// Returns `None` for platforms without such a list.
    pub fn multi_cpus(&self, platform: &ApplePlatformType) -> Option<(&[String], &'static str)> {
        match platform {
            ApplePlatformType::Ios => Some((self.ios_multi_cpus.as_slice(), "--ios_multi_cpus")),
            ApplePlatformType::Watchos => Some((self.watchos_cpus.as_slice(), "--watchos_cpus")),
            ApplePlatformType::Tvos => Some((self.tvos_cpus.as_slice(), "--tvos_cpus")),
            ApplePlatformType::Macos => Some((self.macos_cpus.as_slice(), "--macos_cpus")),
            ApplePlatformType::Other(_) => None,
        }
    }
}
