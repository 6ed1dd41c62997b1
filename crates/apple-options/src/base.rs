//! Core build options.

use serde::{Deserialize, Serialize};

/// Default value of the generic cpu option.
pub const DEFAULT_CPU: &str = "darwin_x86_64";

/// Options every configuration carries, independent of language or platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreOptions {
    /// Generic target cpu (`--cpu`).
    pub cpu: String,
}

impl Default for CoreOptions {
    fn default() -> Self {
        Self {
            cpu: DEFAULT_CPU.to_string(),
        }
    }
}
