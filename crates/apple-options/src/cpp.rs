//! Native (C++) toolchain options.

use serde::{Deserialize, Serialize};

use crate::DEFAULT_CROSSTOOL_TOP;

/// Options selecting the C++ toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CppOptions {
    /// Label of the active crosstool (`--crosstool_top`).
    pub crosstool_top: String,

    /// Compiler identity within the crosstool (`--compiler`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiler: Option<String>,

    /// Custom runtime library label (`--grte_top`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub libc_top: Option<String>,

    /// Compilation modes that emit split debug info (`--fission`).
    pub fission_modes: Vec<String>,
}

impl Default for CppOptions {
    fn default() -> Self {
        Self {
            crosstool_top: DEFAULT_CROSSTOOL_TOP.to_string(),
            compiler: None,
            libc_top: None,
            fission_modes: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_table_fills_defaults() {
        let parsed: CppOptions = serde_json::from_str(r#"{"compiler": "clang"}"#).unwrap();
        assert_eq!(parsed.compiler.as_deref(), Some("clang"));
        assert_eq!(parsed.crosstool_top, DEFAULT_CROSSTOOL_TOP);
        assert!(parsed.fission_modes.is_empty());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let parsed = serde_json::from_str::<CppOptions>(r#"{"compilr": "clang"}"#);
        assert!(parsed.is_err());
    }
}
