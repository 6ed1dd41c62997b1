//! Built-in option defaults (layer 1)

use apple_options::BuildOptions;
use serde_json::Value;

use super::ConfigError;

/// Built-in defaults: every fragment at its `Default` value.
#[derive(Debug, Clone)]
pub struct BuiltinDefaults {
    options: BuildOptions,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            options: BuildOptions::with_defaults(),
        }
    }
}

impl BuiltinDefaults {
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Convert to JSON Value for merging
    pub fn to_value(&self) -> Result<Value, ConfigError> {
        serde_json::to_value(&self.options)
            .map_err(|e| ConfigError::ParseError(format!("Invalid builtin defaults: {}", e)))
    }
}
