//! Typed build option fragments for Apple-platform configuration transitions.
//!
//! A [`BuildOptions`] snapshot groups option fragments (core, apple, cpp)
//! keyed by [`FragmentKind`]. Snapshots are immutable once shared; producing
//! a modified configuration means cloning into a working copy, mutating the
//! copy through [`BuildOptions::get_mut`], and sharing the result.

mod apple;
mod base;
mod cpp;
mod error;
mod fragment;
mod platform;
mod snapshot;

pub use apple::AppleOptions;
pub use base::CoreOptions;
pub use cpp::CppOptions;
pub use error::OptionsError;
pub use fragment::{Fragment, FragmentKind, OptionsFragment};
pub use platform::{
    ios_cpu_from_cpu, ApplePlatformType, ConfigurationDistinguisher, DEFAULT_IOS_CPU,
    IOS_CPU_PREFIX,
};
pub use snapshot::BuildOptions;

/// Default C++ crosstool label, shared by the apple and cpp fragments.
pub const DEFAULT_CROSSTOOL_TOP: &str = "@bazel_tools//tools/cpp:toolchain";
