//! Patch that moves a working copy onto the Apple crosstool.

use apple_options::{
    AppleOptions, BuildOptions, ConfigurationDistinguisher, CoreOptions, CppOptions,
};
use tracing::debug;

use super::TransitionError;

/// Compiler identity used by every Apple crosstool. Sanitizer and other
/// instrumented compiler variants are not available on Darwin.
pub const APPLE_COMPILER: &str = "compiler";

/// What [`set_apple_crosstool_configuration`] did to the working copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum PatchEffect {
    /// Cpu and crosstool already matched; the working copy was left untouched.
    Unchanged,
    /// The working copy now uses the Apple crosstool.
    Applied,
}

/// Configure `to` to build with the Apple crosstool named in `from` for `cpu`.
///
/// `from` is the originating snapshot and is only read. `to` is a working copy
/// (usually a clone of `from`) and is mutated in place.
///
/// If `to` already targets `cpu` with the Apple crosstool and `from` encodes
/// the crosstool in the output directory name, nothing is changed. This keeps
/// C++ to Objective-C edges inside an Apple configuration from forking a
/// value-identical configuration.
pub fn set_apple_crosstool_configuration(
    from: &BuildOptions,
    to: &mut BuildOptions,
    cpu: &str,
) -> Result<PatchEffect, TransitionError> {
    let from_apple = from.get::<AppleOptions>()?;
    let crosstool_top = from_apple.crosstool_top.clone();
    let in_output_directory_name = from_apple.crosstool_in_output_directory_name;

    // Look every fragment up before the first write so a missing fragment
    // leaves the working copy untouched.
    let current_cpu = &to.get::<CoreOptions>()?.cpu;
    let current_crosstool_top = &to.get::<CppOptions>()?.crosstool_top;
    to.get::<AppleOptions>()?;

    if current_cpu == cpu && *current_crosstool_top == crosstool_top && in_output_directory_name {
        debug!(cpu, %crosstool_top, "apple crosstool already selected");
        return Ok(PatchEffect::Unchanged);
    }

    to.get_mut::<CoreOptions>()?.cpu = cpu.to_string();

    let apple = to.get_mut::<AppleOptions>()?;
    apple.target_uses_apple_crosstool = true;
    if in_output_directory_name {
        apple.configuration_distinguisher = ConfigurationDistinguisher::AppleCrosstool;
    }

    let cpp = to.get_mut::<CppOptions>()?;
    cpp.crosstool_top = crosstool_top;
    cpp.compiler = Some(APPLE_COMPILER.to_string());
    // Apple targets always link against the runtime of the platform.
    cpp.libc_top = None;
    // No fission on Darwin.
    cpp.fission_modes.clear();

    debug!(cpu, crosstool_top = %cpp.crosstool_top, "applied apple crosstool");
    Ok(PatchEffect::Applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use apple_options::{FragmentKind, OptionsError};

    const APPLE_TOOLCHAIN: &str = "//toolchains:apple";

    fn from_options(in_output_dir: bool) -> BuildOptions {
        BuildOptions::with_defaults()
            .with(AppleOptions {
                crosstool_top: APPLE_TOOLCHAIN.to_string(),
                crosstool_in_output_directory_name: in_output_dir,
                ..Default::default()
            })
            .with(CppOptions {
                crosstool_top: "//tools/cpp:toolchain".to_string(),
                compiler: Some("clang-asan".to_string()),
                libc_top: Some("//grte:v5".to_string()),
                fission_modes: vec!["dbg".to_string(), "opt".to_string()],
            })
    }

    #[test]
    fn test_patch_effects() {
        let from = from_options(false);
        let mut to = from.clone();

        let effect = set_apple_crosstool_configuration(&from, &mut to, "arm64").unwrap();
        assert_eq!(effect, PatchEffect::Applied);

        assert_eq!(to.get::<CoreOptions>().unwrap().cpu, "arm64");
        let cpp = to.get::<CppOptions>().unwrap();
        assert_eq!(cpp.crosstool_top, APPLE_TOOLCHAIN);
        assert_eq!(cpp.compiler.as_deref(), Some(APPLE_COMPILER));
        assert!(cpp.libc_top.is_none());
        assert!(cpp.fission_modes.is_empty());

        let apple = to.get::<AppleOptions>().unwrap();
        assert!(apple.target_uses_apple_crosstool);
        // Distinguisher is only set when the crosstool is in the output directory name.
        assert_eq!(
            apple.configuration_distinguisher,
            ConfigurationDistinguisher::Unknown
        );

        // The originating snapshot is never touched.
        assert_eq!(from, from_options(false));
    }

    #[test]
    fn test_sets_distinguisher_with_output_directory_name() {
        let from = from_options(true);
        let mut to = from.clone();

        let effect = set_apple_crosstool_configuration(&from, &mut to, "arm64").unwrap();
        assert_eq!(effect, PatchEffect::Applied);
        assert_eq!(
            to.get::<AppleOptions>().unwrap().configuration_distinguisher,
            ConfigurationDistinguisher::AppleCrosstool
        );
    }

    #[test]
    fn test_unchanged_when_already_apple() {
        let mut from = from_options(true);
        from.get_mut::<CoreOptions>().unwrap().cpu = "arm64".to_string();
        from.get_mut::<CppOptions>().unwrap().crosstool_top = APPLE_TOOLCHAIN.to_string();
        let mut to = from.clone();

        let effect = set_apple_crosstool_configuration(&from, &mut to, "arm64").unwrap();
        assert_eq!(effect, PatchEffect::Unchanged);
        assert_eq!(to, from);
        // The compiler is left alone on the no-op path.
        assert_eq!(
            to.get::<CppOptions>().unwrap().compiler.as_deref(),
            Some("clang-asan")
        );
    }

    #[test]
    fn test_matching_values_still_patch_without_output_directory_name() {
        let mut from = from_options(false);
        from.get_mut::<CoreOptions>().unwrap().cpu = "arm64".to_string();
        from.get_mut::<CppOptions>().unwrap().crosstool_top = APPLE_TOOLCHAIN.to_string();
        let mut to = from.clone();

        let effect = set_apple_crosstool_configuration(&from, &mut to, "arm64").unwrap();
        assert_eq!(effect, PatchEffect::Applied);
        assert!(to.get::<AppleOptions>().unwrap().target_uses_apple_crosstool);
    }

    #[test]
    fn test_missing_fragment_leaves_copy_untouched() {
        let from = from_options(false);
        let mut to = BuildOptions::new()
            .with(CoreOptions::default())
            .with(AppleOptions::default());
        let before = to.clone();

        let err = set_apple_crosstool_configuration(&from, &mut to, "arm64").unwrap_err();
        assert_eq!(
            err,
            TransitionError::Options(OptionsError::MissingFragment {
                kind: FragmentKind::Cpp
            })
        );
        assert_eq!(to, before);
    }
}
