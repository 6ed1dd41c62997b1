//! Apple crosstool configuration transition
//!
//! Maps a build options snapshot to the snapshot Apple-platform dependencies
//! must be built in: the Apple crosstool, a single Apple architecture as the
//! cpu, and no toolchain features Darwin does not support. The transition is
//! pure; the input snapshot is returned as-is whenever nothing has to change.

pub mod config;
pub mod logging;
pub mod transition;

pub use config::{ConfigError, EffectiveOptions};
pub use transition::{
    AppleCrosstoolTransition, ConfigurationTransition, MultiArchSplitTransition, PatchOutcome,
    PatchTransition, SplitTransition, TransitionApplied, TransitionError,
    APPLE_CROSSTOOL_TRANSITION,
};
