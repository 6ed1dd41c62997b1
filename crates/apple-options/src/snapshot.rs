//! The build options snapshot.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

use crate::apple::AppleOptions;
use crate::base::CoreOptions;
use crate::cpp::CppOptions;
use crate::error::OptionsError;
use crate::fragment::{Fragment, FragmentKind, OptionsFragment};

/// A configuration snapshot: at most one fragment per [`FragmentKind`].
///
/// `Clone` deep-copies every fragment, so a clone is an independent working
/// copy. Shared snapshots are handed around as `Arc<BuildOptions>` and never
/// mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OptionsTable", into = "OptionsTable")]
pub struct BuildOptions {
    fragments: BTreeMap<FragmentKind, Fragment>,
}

impl BuildOptions {
    /// Empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot holding every fragment at its default value.
    pub fn with_defaults() -> Self {
        Self::new()
            .with(CoreOptions::default())
            .with(AppleOptions::default())
            .with(CppOptions::default())
    }

    /// Add a fragment, replacing any fragment of the same kind.
    pub fn with<T: OptionsFragment>(mut self, fragment: T) -> Self {
        self.insert(fragment);
        self
    }

    /// Insert a fragment, returning the one it replaced.
    pub fn insert<T: OptionsFragment>(&mut self, fragment: T) -> Option<Fragment> {
        self.fragments.insert(T::KIND, fragment.into_fragment())
    }

    pub fn contains(&self, kind: FragmentKind) -> bool {
        self.fragments.contains_key(&kind)
    }

    /// Kinds present, in stable order.
    pub fn kinds(&self) -> impl Iterator<Item = FragmentKind> + '_ {
        self.fragments.keys().copied()
    }

    /// Look up a fragment by its type.
    pub fn get<T: OptionsFragment>(&self) -> Result<&T, OptionsError> {
        self.fragments
            .get(&T::KIND)
            .and_then(T::from_fragment)
            .ok_or(OptionsError::MissingFragment { kind: T::KIND })
    }

    /// Mutable lookup, for working copies only.
    pub fn get_mut<T: OptionsFragment>(&mut self) -> Result<&mut T, OptionsError> {
        self.fragments
            .get_mut(&T::KIND)
            .and_then(T::from_fragment_mut)
            .ok_or(OptionsError::MissingFragment { kind: T::KIND })
    }

    /// Check that every label-valued option holds a build label.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if let Ok(apple) = self.get::<AppleOptions>() {
            check_label("--apple_crosstool_top", &apple.crosstool_top)?;
        }
        if let Ok(cpp) = self.get::<CppOptions>() {
            check_label("--crosstool_top", &cpp.crosstool_top)?;
            if let Some(libc_top) = &cpp.libc_top {
                check_label("--grte_top", libc_top)?;
            }
        }
        Ok(())
    }

    /// SHA-256 hex digest of the RFC 8785 canonical JSON of this snapshot.
    ///
    /// Value-equal snapshots have equal checksums.
    pub fn checksum(&self) -> Result<String, OptionsError> {
        let jcs_bytes = serde_json_canonicalizer::to_vec(self)
            .map_err(|e| OptionsError::Canonicalization(e.to_string()))?;

        let mut hasher = Sha256::new();
        hasher.update(&jcs_bytes);
        Ok(hex::encode(hasher.finalize()))
    }
}

fn check_label(option: &str, label: &str) -> Result<(), OptionsError> {
    if label.starts_with("//") || label.starts_with('@') {
        Ok(())
    } else {
        Err(OptionsError::InvalidLabel {
            option: option.to_string(),
            label: label.to_string(),
        })
    }
}

/// Serialized form of a snapshot: one optional table per fragment kind.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct OptionsTable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    core: Option<CoreOptions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    apple: Option<AppleOptions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    cpp: Option<CppOptions>,
}

impl From<OptionsTable> for BuildOptions {
    fn from(table: OptionsTable) -> Self {
        let mut options = BuildOptions::new();
        if let Some(core) = table.core {
            options.insert(core);
        }
        if let Some(apple) = table.apple {
            options.insert(apple);
        }
        if let Some(cpp) = table.cpp {
            options.insert(cpp);
        }
        options
    }
}

impl From<BuildOptions> for OptionsTable {
    fn from(options: BuildOptions) -> Self {
        let mut table = OptionsTable::default();
        for fragment in options.fragments.into_values() {
            match fragment {
                Fragment::Core(core) => table.core = Some(core),
                Fragment::Apple(apple) => table.apple = Some(apple),
                Fragment::Cpp(cpp) => table.cpp = Some(cpp),
            }
        }
        table
    }
}
