//! Identity mappings: the `(kind, id)` key dimension of every rule.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Whether a mapping names a single user or a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingKind {
    User,
    Group,
}

impl MappingKind {
    /// Parse a kind string the way the edit surface historically has:
    /// `"user"` (exact, case-sensitive) maps to [`MappingKind::User`],
    /// everything else (including `"User"` and the empty string) maps to
    /// [`MappingKind::Group`].
    ///
    /// The fallback is logged so a typo'd kind is observable rather than
    /// silently becoming a group mapping. Callers that want strict
    /// behavior can match on the string themselves and construct the enum
    /// directly.
    pub fn parse_lenient(kind: &str) -> Self {
        match kind {
            "user" => MappingKind::User,
            "group" => MappingKind::Group,
            other => {
                debug!(kind = other, "unrecognized mapping kind, defaulting to group");
                MappingKind::Group
            }
        }
    }

    /// The canonical string form, as stored and serialized.
    pub const fn as_str(self) -> &'static str {
        match self {
            MappingKind::User => "user",
            MappingKind::Group => "group",
        }
    }
}

impl fmt::Display for MappingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference to one user or group: the identity dimension of a rule key.
///
/// Equality and hashing are structural over both fields; the id string is
/// opaque to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityMapping {
    pub kind: MappingKind,
    pub id: String,
}

impl IdentityMapping {
    /// Build a mapping from a raw kind string, applying the lenient kind
    /// parsing of [`MappingKind::parse_lenient`].
    pub fn new(kind: &str, id: impl Into<String>) -> Self {
        Self {
            kind: MappingKind::parse_lenient(kind),
            id: id.into(),
        }
    }

    /// A user mapping.
    pub fn user(id: impl Into<String>) -> Self {
        Self {
            kind: MappingKind::User,
            id: id.into(),
        }
    }

    /// A group mapping.
    pub fn group(id: impl Into<String>) -> Self {
        Self {
            kind: MappingKind::Group,
            id: id.into(),
        }
    }
}

impl fmt::Display for IdentityMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}
