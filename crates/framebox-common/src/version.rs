//! Version of the saved asset layout.

use serde::{Deserialize, Serialize};

/// Asset layout version (`major.minor.patch`).
///
/// A major bump changes the layout incompatibly. A minor bump only adds
/// optional fields, which older readers skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Incompatible layout changes
    pub major: u16,
    /// Added optional fields
    pub minor: u16,
    /// Fixes with no layout change
    pub patch: u16,
}

/// How a reader relates to the version a file was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compatibility {
    /// Same major and minor
    Exact,
    /// Written by an older minor; missing fields take their defaults
    OlderMinor,
    /// Written by a newer minor; fields this reader does not know are dropped
    NewerMinor,
    /// Different major; the file cannot be read
    Incompatible,
}

impl SchemaVersion {
    /// Creates a new schema version.
    #[must_use]
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Current saved hitbox asset layout.
    pub const HITBOX_ASSET: Self = Self::new(1, 0, 0);

    /// Classifies data written with `written` when read by `self`.
    #[must_use]
    pub const fn compatibility(&self, written: &Self) -> Compatibility {
        if self.major != written.major {
            Compatibility::Incompatible
        } else if written.minor > self.minor {
            Compatibility::NewerMinor
        } else if written.minor < self.minor {
            Compatibility::OlderMinor
        } else {
            Compatibility::Exact
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::HITBOX_ASSET
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
