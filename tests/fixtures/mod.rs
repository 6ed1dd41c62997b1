//! Shared snapshot builders for integration tests.

#![allow(dead_code)]

use apple_options::{
    AppleOptions, ApplePlatformType, BuildOptions, ConfigurationDistinguisher, CoreOptions,
    CppOptions,
};
use std::sync::Arc;

/// Apple crosstool label used throughout the tests.
pub const APPLE_TOOLCHAIN: &str = "//toolchains:apple";

/// Default (non-Apple) crosstool label.
pub const DEFAULT_TOOLCHAIN: &str = "//tools/cpp:toolchain";

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Builder for test snapshots, starting from a C++ configuration with an
/// instrumented compiler, a custom runtime and fission enabled.
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    core: CoreOptions,
    apple: AppleOptions,
    cpp: CppOptions,
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self {
            core: CoreOptions {
                cpu: "k8".to_string(),
            },
            apple: AppleOptions {
                crosstool_top: APPLE_TOOLCHAIN.to_string(),
                ..Default::default()
            },
            cpp: CppOptions {
                crosstool_top: DEFAULT_TOOLCHAIN.to_string(),
                compiler: Some("clang-tsan".to_string()),
                libc_top: Some("//grte:v5".to_string()),
                fission_modes: strings(&["dbg", "opt"]),
            },
        }
    }
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cpu(mut self, cpu: &str) -> Self {
        self.core.cpu = cpu.to_string();
        self
    }

    pub fn platform(mut self, platform: ApplePlatformType) -> Self {
        self.apple.platform_type = platform;
        self
    }

    pub fn split_cpu(mut self, cpu: &str) -> Self {
        self.apple.split_cpu = Some(cpu.to_string());
        self
    }

    pub fn ios_cpus(mut self, cpus: &[&str]) -> Self {
        self.apple.ios_multi_cpus = strings(cpus);
        self
    }

    pub fn watchos_cpus(mut self, cpus: &[&str]) -> Self {
        self.apple.watchos_cpus = strings(cpus);
        self
    }

    pub fn tvos_cpus(mut self, cpus: &[&str]) -> Self {
        self.apple.tvos_cpus = strings(cpus);
        self
    }

    pub fn macos_cpus(mut self, cpus: &[&str]) -> Self {
        self.apple.macos_cpus = strings(cpus);
        self
    }

    /// Toggle A: crosstool in the output directory name.
    pub fn in_output_directory_name(mut self, enabled: bool) -> Self {
        self.apple.crosstool_in_output_directory_name = enabled;
        self
    }

    /// Toggle B: transition enabled for all Apple targets.
    pub fn enabled_for_all(mut self, enabled: bool) -> Self {
        self.apple.enable_apple_crosstool_transition = enabled;
        self
    }

    pub fn distinguisher(mut self, distinguisher: ConfigurationDistinguisher) -> Self {
        self.apple.configuration_distinguisher = distinguisher;
        self
    }

    pub fn cpp_crosstool(mut self, label: &str) -> Self {
        self.cpp.crosstool_top = label.to_string();
        self
    }

    pub fn build(self) -> Arc<BuildOptions> {
        Arc::new(
            BuildOptions::new()
                .with(self.core)
                .with(self.apple)
                .with(self.cpp),
        )
    }
}
