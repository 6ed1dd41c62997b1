//! Architecture resolution from Apple and core options.

use apple_options::{ios_cpu_from_cpu, AppleOptions, ApplePlatformType, CoreOptions};
use tracing::warn;

use super::TransitionError;

/// Resolve the single architecture the Apple crosstool should target.
///
/// Priority:
/// 1. a non-empty `--apple_split_cpu`, for any platform type;
/// 2. the first entry of the platform's multi-cpu list;
/// 3. for iOS only, the architecture named by the generic cpu.
///
/// watchOS, tvOS and macOS have no cpu-derived fallback: an empty list is an
/// error.
pub fn determine_single_architecture(
    apple: &AppleOptions,
    core: &CoreOptions,
) -> Result<String, TransitionError> {
    if let Some(split_cpu) = apple.split_cpu() {
        return Ok(split_cpu.to_string());
    }

    let platform = &apple.platform_type;
    let (cpus, option) = platform_cpus(apple, platform)?;
    match (platform, cpus.first()) {
        (_, Some(cpu)) => Ok(cpu.clone()),
        (ApplePlatformType::Ios, None) => Ok(ios_cpu_from_cpu(&core.cpu).to_string()),
        (_, None) => {
            warn!(%platform, option, "empty architecture list");
            Err(TransitionError::EmptyArchitectureList {
                platform: platform.clone(),
                option,
            })
        }
    }
}

/// Architectures a multi-architecture split for `platform` fans out to.
///
/// Follows the same rules as [`determine_single_architecture`] but keeps every
/// entry of the list. The result is never empty.
pub fn split_architectures(
    apple: &AppleOptions,
    core: &CoreOptions,
    platform: &ApplePlatformType,
) -> Result<Vec<String>, TransitionError> {
    if let Some(split_cpu) = apple.split_cpu() {
        return Ok(vec![split_cpu.to_string()]);
    }

    let (cpus, option) = platform_cpus(apple, platform)?;
    if !cpus.is_empty() {
        return Ok(cpus.to_vec());
    }
    match platform {
        ApplePlatformType::Ios => Ok(vec![ios_cpu_from_cpu(&core.cpu).to_string()]),
        _ => {
            warn!(%platform, option, "empty architecture list");
            Err(TransitionError::EmptyArchitectureList {
                platform: platform.clone(),
                option,
            })
        }
    }
}

fn platform_cpus<'a>(
    apple: &'a AppleOptions,
    platform: &ApplePlatformType,
) -> Result<(&'a [String], &'static str), TransitionError> {
    apple.multi_cpus(platform).ok_or_else(|| {
        warn!(%platform, "unsupported platform type");
        TransitionError::UnsupportedPlatform {
            platform: platform.clone(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cpus(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn core(cpu: &str) -> CoreOptions {
        CoreOptions {
            cpu: cpu.to_string(),
        }
    }

    #[test]
    fn test_split_cpu_wins_for_every_platform() {
        for platform in ApplePlatformType::KNOWN {
            let apple = AppleOptions {
                platform_type: platform.clone(),
                split_cpu: Some("arm64e".to_string()),
                ios_multi_cpus: cpus(&["armv7"]),
                watchos_cpus: Vec::new(),
                macos_cpus: Vec::new(),
                tvos_cpus: Vec::new(),
                ..Default::default()
            };
            let arch = determine_single_architecture(&apple, &core("ios_x86_64")).unwrap();
            assert_eq!(arch, "arm64e", "platform {}", platform);
        }
    }

    #[test]
    fn test_split_cpu_wins_for_unsupported_platform() {
        let apple = AppleOptions {
            platform_type: ApplePlatformType::Other("visionos".to_string()),
            split_cpu: Some("arm64".to_string()),
            ..Default::default()
        };
        assert_eq!(
            determine_single_architecture(&apple, &core("k8")).unwrap(),
            "arm64"
        );
    }

    #[test]
    fn test_empty_split_cpu_ignored() {
        let apple = AppleOptions {
            platform_type: ApplePlatformType::Macos,
            split_cpu: Some(String::new()),
            macos_cpus: cpus(&["arm64", "x86_64"]),
            ..Default::default()
        };
        assert_eq!(
            determine_single_architecture(&apple, &core("k8")).unwrap(),
            "arm64"
        );
    }

    #[test]
    fn test_ios_uses_first_multi_cpu() {
        let apple = AppleOptions {
            ios_multi_cpus: cpus(&["arm64", "armv7"]),
            ..Default::default()
        };
        assert_eq!(
            determine_single_architecture(&apple, &core("ios_x86_64")).unwrap(),
            "arm64"
        );
    }

    #[test]
    fn test_ios_falls_back_to_generic_cpu() {
        let apple = AppleOptions::default();
        assert_eq!(
            determine_single_architecture(&apple, &core("x86_64")).unwrap(),
            "x86_64"
        );
        assert_eq!(
            determine_single_architecture(&apple, &core("ios_armv7")).unwrap(),
            "armv7"
        );
    }

    #[test]
    fn test_non_ios_uses_first_multi_cpu() {
        let apple = AppleOptions {
            platform_type: ApplePlatformType::Watchos,
            watchos_cpus: cpus(&["arm64_32", "armv7k"]),
            ..Default::default()
        };
        assert_eq!(
            determine_single_architecture(&apple, &core("k8")).unwrap(),
            "arm64_32"
        );
    }

    #[test]
    fn test_non_ios_empty_list_is_error() {
        let cases = [
            (ApplePlatformType::Watchos, "--watchos_cpus"),
            (ApplePlatformType::Tvos, "--tvos_cpus"),
            (ApplePlatformType::Macos, "--macos_cpus"),
        ];
        for (platform, expected_option) in cases {
            let apple = AppleOptions {
                platform_type: platform.clone(),
                watchos_cpus: Vec::new(),
                tvos_cpus: Vec::new(),
                macos_cpus: Vec::new(),
                ..Default::default()
            };
            let err = determine_single_architecture(&apple, &core("ios_arm64")).unwrap_err();
            assert_eq!(
                err,
                TransitionError::EmptyArchitectureList {
                    platform: platform.clone(),
                    option: expected_option,
                }
            );
            assert!(err.to_string().contains(expected_option));
        }
    }

    #[test]
    fn test_unsupported_platform() {
        let apple = AppleOptions {
            platform_type: ApplePlatformType::Other("visionos".to_string()),
            ..Default::default()
        };
        let err = determine_single_architecture(&apple, &core("k8")).unwrap_err();
        assert!(matches!(err, TransitionError::UnsupportedPlatform { .. }));
        assert_eq!(err.to_string(), "Unhandled platform type visionos");
    }

    #[test]
    fn test_split_architectures_keeps_whole_list() {
        let apple = AppleOptions {
            ios_multi_cpus: cpus(&["arm64", "armv7"]),
            ..Default::default()
        };
        assert_eq!(
            split_architectures(&apple, &core("k8"), &ApplePlatformType::Ios).unwrap(),
            cpus(&["arm64", "armv7"])
        );
    }

    #[test]
    fn test_split_architectures_ios_fallback() {
        let apple = AppleOptions::default();
        assert_eq!(
            split_architectures(&apple, &core("ios_arm64"), &ApplePlatformType::Ios).unwrap(),
            cpus(&["arm64"])
        );
    }

    #[test]
    fn test_split_architectures_empty_tvos_list() {
        let apple = AppleOptions {
            tvos_cpus: Vec::new(),
            ..Default::default()
        };
        let err = split_architectures(&apple, &core("k8"), &ApplePlatformType::Tvos).unwrap_err();
        assert!(matches!(
            err,
            TransitionError::EmptyArchitectureList {
                option: "--tvos_cpus",
                ..
            }
        ));
    }
}
