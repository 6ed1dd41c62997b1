//! Uniform application of single and split transitions.

use apple_options::{ApplePlatformType, BuildOptions};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::{
    MultiArchSplitTransition, PatchTransition, SplitTransition, TransitionError,
    APPLE_CROSSTOOL_TRANSITION,
};

/// Result of applying a transition to a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionApplied {
    /// Transition to a single configuration.
    Single(Arc<BuildOptions>),
    /// Split transition, keyed by architecture.
    Split(BTreeMap<String, Arc<BuildOptions>>),
}

impl TransitionApplied {
    pub fn single(&self) -> Option<&Arc<BuildOptions>> {
        match self {
            TransitionApplied::Single(options) => Some(options),
            TransitionApplied::Split(_) => None,
        }
    }

    pub fn split(&self) -> Option<&BTreeMap<String, Arc<BuildOptions>>> {
        match self {
            TransitionApplied::Split(branches) => Some(branches),
            TransitionApplied::Single(_) => None,
        }
    }
}

/// The transitions an evaluator can attach to a dependency edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationTransition {
    /// [`crate::AppleCrosstoolTransition`]
    AppleCrosstool,
    /// [`MultiArchSplitTransition`] for the given platform.
    MultiArchSplit(ApplePlatformType),
}

impl ConfigurationTransition {
    pub fn apply(&self, options: &Arc<BuildOptions>) -> Result<TransitionApplied, TransitionError> {
        match self {
            ConfigurationTransition::AppleCrosstool => APPLE_CROSSTOOL_TRANSITION
                .patch(options)
                .map(TransitionApplied::Single),
            ConfigurationTransition::MultiArchSplit(platform) => {
                MultiArchSplitTransition::new(platform.clone())
                    .split(options)
                    .map(TransitionApplied::Split)
            }
        }
    }
}
