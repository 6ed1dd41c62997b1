//! Decides whether the crosstool transition runs for a snapshot.

use apple_options::{AppleOptions, BuildOptions};
use tracing::debug;

use super::TransitionError;

/// Gate verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Return the input snapshot unchanged.
    Skip,
    /// Resolve an architecture and patch a clone.
    Apply,
}

/// Whether the crosstool transition is enabled for every Apple target.
pub fn applies_to_all_apple_targets(options: &BuildOptions) -> Result<bool, TransitionError> {
    Ok(options
        .get::<AppleOptions>()?
        .enable_apple_crosstool_transition)
}

/// Decide whether `options` should be transitioned.
///
/// With the crosstool in the output directory name, any non-default
/// distinguisher means an Apple transition already moved this configuration
/// onto the Apple crosstool. Without it, the transition only runs when
/// enabled for all Apple targets.
pub fn applicability(options: &BuildOptions) -> Result<Verdict, TransitionError> {
    let apple = options.get::<AppleOptions>()?;

    let verdict = if apple.crosstool_in_output_directory_name {
        if apple.configuration_distinguisher.is_unknown() {
            Verdict::Apply
        } else {
            Verdict::Skip
        }
    } else if applies_to_all_apple_targets(options)? {
        Verdict::Apply
    } else {
        Verdict::Skip
    };

    debug!(
        ?verdict,
        in_output_directory_name = apple.crosstool_in_output_directory_name,
        distinguisher = ?apple.configuration_distinguisher,
        "crosstool transition gate"
    );
    Ok(verdict)
}
