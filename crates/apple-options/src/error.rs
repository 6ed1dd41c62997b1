//! Option store errors.

use crate::fragment::FragmentKind;

/// Errors raised while reading or validating a [`crate::BuildOptions`] snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    /// The snapshot has no fragment of the requested kind.
    #[error("Configuration has no '{kind}' options fragment")]
    MissingFragment { kind: FragmentKind },

    /// A label-valued option is not a build label.
    #[error("Invalid label for {option}: '{label}' (labels start with '//' or '@')")]
    InvalidLabel { option: String, label: String },

    /// Canonical JSON serialization failed while computing a checksum.
    #[error("Canonicalization failed: {0}")]
    Canonicalization(String),
}
