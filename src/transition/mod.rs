//! Configuration transitions onto the Apple crosstool.
//!
//! The crosstool transition runs in three steps:
//! 1. [`gate::applicability`] decides whether to transition at all
//! 2. [`arch::determine_single_architecture`] resolves the target cpu
//! 3. [`patch::set_apple_crosstool_configuration`] patches a clone
//!
//! The input snapshot is never mutated. When nothing changes the same `Arc`
//! is handed back so the caller can keep using its existing configured node.

mod applied;
mod arch;
mod error;
mod gate;
mod patch;
mod split;

pub use applied::{ConfigurationTransition, TransitionApplied};
pub use arch::{determine_single_architecture, split_architectures};
pub use error::TransitionError;
pub use gate::{applicability, applies_to_all_apple_targets, Verdict};
pub use patch::{set_apple_crosstool_configuration, PatchEffect, APPLE_COMPILER};
pub use split::MultiArchSplitTransition;

use apple_options::{AppleOptions, BuildOptions, CoreOptions};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A transition producing exactly one configuration.
pub trait PatchTransition: Send + Sync {
    fn patch(&self, options: &Arc<BuildOptions>) -> Result<Arc<BuildOptions>, TransitionError>;
}

/// A transition fanning out to one configuration per key.
pub trait SplitTransition: Send + Sync {
    fn split(
        &self,
        options: &Arc<BuildOptions>,
    ) -> Result<BTreeMap<String, Arc<BuildOptions>>, TransitionError>;
}

/// How the crosstool transition treated a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The gate returned [`Verdict::Skip`]; this is the input snapshot.
    Skipped(Arc<BuildOptions>),
    /// The snapshot already used the Apple crosstool; this is the input snapshot.
    Unchanged(Arc<BuildOptions>),
    /// A freshly patched snapshot.
    Patched(Arc<BuildOptions>),
}

impl PatchOutcome {
    pub fn options(&self) -> &Arc<BuildOptions> {
        match self {
            PatchOutcome::Skipped(options)
            | PatchOutcome::Unchanged(options)
            | PatchOutcome::Patched(options) => options,
        }
    }

    pub fn into_options(self) -> Arc<BuildOptions> {
        match self {
            PatchOutcome::Skipped(options)
            | PatchOutcome::Unchanged(options)
            | PatchOutcome::Patched(options) => options,
        }
    }

    pub fn is_patched(&self) -> bool {
        matches!(self, PatchOutcome::Patched(_))
    }
}

/// Transition that makes C++ toolchain selection use `--apple_crosstool_top`.
///
/// Stateless; share [`APPLE_CROSSTOOL_TRANSITION`] rather than constructing new
/// values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppleCrosstoolTransition;

/// The shared crosstool transition instance.
pub static APPLE_CROSSTOOL_TRANSITION: AppleCrosstoolTransition = AppleCrosstoolTransition;

impl AppleCrosstoolTransition {
    /// Run the transition, reporting which path was taken.
    pub fn evaluate(&self, options: &Arc<BuildOptions>) -> Result<PatchOutcome, TransitionError> {
        if applicability(options)? == Verdict::Skip {
            return Ok(PatchOutcome::Skipped(Arc::clone(options)));
        }

        let cpu = determine_single_architecture(
            options.get::<AppleOptions>()?,
            options.get::<CoreOptions>()?,
        )?;

        let mut result = BuildOptions::clone(options);
        match set_apple_crosstool_configuration(options, &mut result, &cpu)? {
            PatchEffect::Unchanged => Ok(PatchOutcome::Unchanged(Arc::clone(options))),
            PatchEffect::Applied => Ok(PatchOutcome::Patched(Arc::new(result))),
        }
    }
}

impl PatchTransition for AppleCrosstoolTransition {
    fn patch(&self, options: &Arc<BuildOptions>) -> Result<Arc<BuildOptions>, TransitionError> {
        self.evaluate(options).map(PatchOutcome::into_options)
    }
}
