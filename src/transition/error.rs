//! Transition errors.

use apple_options::{ApplePlatformType, OptionsError};

/// Errors that fail a transition. No partial patch is ever returned alongside one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// The platform type is not one of ios, watchos, tvos or macos.
    #[error("Unhandled platform type {platform}")]
    UnsupportedPlatform { platform: ApplePlatformType },

    /// A platform's multi-architecture list is empty and no split cpu is set.
    #[error("No architecture for platform {platform}: {option} is empty and --apple_split_cpu is not set")]
    EmptyArchitectureList {
        platform: ApplePlatformType,
        option: &'static str,
    },

    /// The snapshot is missing a fragment the transition reads or writes.
    #[error(transparent)]
    Options(#[from] OptionsError),
}
