//! Fragment kinds and typed fragment access.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::apple::AppleOptions;
use crate::base::CoreOptions;
use crate::cpp::CppOptions;

/// Stable tag identifying a fragment within a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    Core,
    Apple,
    Cpp,
}

impl FragmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FragmentKind::Core => "core",
            FragmentKind::Apple => "apple",
            FragmentKind::Cpp => "cpp",
        }
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One option fragment of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Core(CoreOptions),
    Apple(AppleOptions),
    Cpp(CppOptions),
}

impl Fragment {
    pub fn kind(&self) -> FragmentKind {
        match self {
            Fragment::Core(_) => FragmentKind::Core,
            Fragment::Apple(_) => FragmentKind::Apple,
            Fragment::Cpp(_) => FragmentKind::Cpp,
        }
    }
}

/// A concrete fragment type that can be looked up in a snapshot by kind.
pub trait OptionsFragment: Clone + Sized {
    /// Kind tag this fragment is stored under.
    const KIND: FragmentKind;

    fn from_fragment(fragment: &Fragment) -> Option<&Self>;

    fn from_fragment_mut(fragment: &mut Fragment) -> Option<&mut Self>;

    fn into_fragment(self) -> Fragment;
}

macro_rules! impl_options_fragment {
    ($ty:ty, $variant:ident) => {
        impl OptionsFragment for $ty {
            const KIND: FragmentKind = FragmentKind::$variant;

            fn from_fragment(fragment: &Fragment) -> Option<&Self> {
                match fragment {
                    Fragment::$variant(options) => Some(options),
                    _ => None,
                }
            }

            fn from_fragment_mut(fragment: &mut Fragment) -> Option<&mut Self> {
                match fragment {
                    Fragment::$variant(options) => Some(options),
                    _ => None,
                }
            }

            fn into_fragment(self) -> Fragment {
                Fragment::$variant(self)
            }
        }
    };
}

impl_options_fragment!(CoreOptions, Core);
impl_options_fragment!(AppleOptions, Apple);
impl_options_fragment!(CppOptions, Cpp);
