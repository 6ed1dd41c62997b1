//! Layered loading of build options snapshots
//!
//! Implements the 4-layer options merge:
//! 1. Built-in fragment defaults
//! 2. Host/user options (~/.config/apple-crosstool/options.toml)
//! 3. Repo options (.apple-crosstool/options.toml)
//! 4. CLI overrides (`--set fragment.field=value`)

mod defaults;
mod effective;
mod merge;

pub use defaults::BuiltinDefaults;
pub use effective::{
    default_host_config_path, ConfigError, ConfigOrigin, ConfigSource, EffectiveOptions,
    DEFAULT_REPO_CONFIG,
};
pub use merge::{deep_merge, merge_layers, parse_override, parse_overrides};
