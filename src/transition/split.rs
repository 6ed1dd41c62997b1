//! Multi-architecture split onto the Apple crosstool.

use apple_options::{AppleOptions, ApplePlatformType, BuildOptions, CoreOptions};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use super::{
    set_apple_crosstool_configuration, split_architectures, SplitTransition, TransitionError,
};

/// Fans a configuration out to one Apple-crosstool configuration per
/// architecture of a platform.
///
/// Each branch carries the architecture in `--apple_split_cpu` and the
/// platform's split distinguisher. With the crosstool in the output directory
/// name, the crosstool transition leaves such a branch alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiArchSplitTransition {
    platform: ApplePlatformType,
}

impl MultiArchSplitTransition {
    pub fn new(platform: ApplePlatformType) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> &ApplePlatformType {
        &self.platform
    }
}

impl SplitTransition for MultiArchSplitTransition {
    fn split(
        &self,
        options: &Arc<BuildOptions>,
    ) -> Result<BTreeMap<String, Arc<BuildOptions>>, TransitionError> {
        let distinguisher =
            self.platform
                .split_distinguisher()
                .ok_or_else(|| TransitionError::UnsupportedPlatform {
                    platform: self.platform.clone(),
                })?;
        let cpus = split_architectures(
            options.get::<AppleOptions>()?,
            options.get::<CoreOptions>()?,
            &self.platform,
        )?;

        let mut branches = BTreeMap::new();
        for cpu in cpus {
            if branches.contains_key(&cpu) {
                continue;
            }

            let mut branch = BuildOptions::clone(options);
            // The branch is kept even when the crosstool patch is a no-op:
            // the split cpu and distinguisher below already set it apart.
            let _ = set_apple_crosstool_configuration(options, &mut branch, &cpu)?;

            let apple = branch.get_mut::<AppleOptions>()?;
            apple.platform_type = self.platform.clone();
            apple.split_cpu = Some(cpu.clone());
            apple.configuration_distinguisher = distinguisher;

            debug!(platform = %self.platform, %cpu, "split branch");
            branches.insert(cpu, Arc::new(branch));
        }
        Ok(branches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::{PatchTransition, APPLE_CROSSTOOL_TRANSITION};
    use apple_options::{ConfigurationDistinguisher, CppOptions};

    fn options(in_output_dir: bool) -> Arc<BuildOptions> {
        Arc::new(BuildOptions::with_defaults().with(AppleOptions {
            watchos_cpus: vec!["armv7k".to_string(), "arm64_32".to_string()],
            crosstool_top: "//toolchains:apple".to_string(),
            crosstool_in_output_directory_name: in_output_dir,
            ..Default::default()
        }))
    }

    #[test]
    fn test_one_branch_per_cpu() {
        let split = MultiArchSplitTransition::new(ApplePlatformType::Watchos);
        let branches = split.split(&options(false)).unwrap();

        assert_eq!(
            branches.keys().collect::<Vec<_>>(),
            vec!["arm64_32", "armv7k"]
        );
        for (cpu, branch) in &branches {
            assert_eq!(&branch.get::<CoreOptions>().unwrap().cpu, cpu);
            let apple = branch.get::<AppleOptions>().unwrap();
            assert_eq!(apple.platform_type, ApplePlatformType::Watchos);
            assert_eq!(apple.split_cpu(), Some(cpu.as_str()));
            assert_eq!(
                apple.configuration_distinguisher,
                ConfigurationDistinguisher::AppleBinWatchos
            );
            assert!(apple.target_uses_apple_crosstool);
            assert_eq!(
                branch.get::<CppOptions>().unwrap().crosstool_top,
                "//toolchains:apple"
            );
        }
    }

    #[test]
    fn test_duplicate_cpus_collapse() {
        let mut opts = BuildOptions::clone(&options(false));
        opts.get_mut::<AppleOptions>().unwrap().macos_cpus =
            vec!["arm64".to_string(), "arm64".to_string()];
        let split = MultiArchSplitTransition::new(ApplePlatformType::Macos);

        let branches = split.split(&Arc::new(opts)).unwrap();
        assert_eq!(branches.len(), 1);
    }

    #[test]
    fn test_crosstool_transition_leaves_branch_alone() {
        let split = MultiArchSplitTransition::new(ApplePlatformType::Watchos);
        let branches = split.split(&options(true)).unwrap();

        for branch in branches.values() {
            let again = APPLE_CROSSTOOL_TRANSITION.patch(branch).unwrap();
            assert!(Arc::ptr_eq(&again, branch));
        }
    }

    #[test]
    fn test_unsupported_platform() {
        let split = MultiArchSplitTransition::new(ApplePlatformType::Other("linux".to_string()));
        let err = split.split(&options(false)).unwrap_err();
        assert!(matches!(err, TransitionError::UnsupportedPlatform { .. }));
    }
}
