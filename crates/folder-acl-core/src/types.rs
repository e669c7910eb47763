//! Identifier newtypes for the folder ACL engine.
//!
//! Folders and filesystem nodes are identified by opaque integer ids
//! assigned by the surrounding storage layer. Newtypes keep the two from
//! being mixed up at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a managed folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FolderId(pub i64);

impl FolderId {
    /// Get the raw id.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for FolderId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Identifier of a single filesystem entry (file or directory) inside a
/// managed folder's tree.
///
/// Node ids are stable across renames, unlike path strings; callers resolve
/// a path to a `NodeId` once per request and key rules on the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub i64);

impl NodeId {
    /// Get the raw id.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId(42).to_string(), "42");
        assert_eq!(FolderId(7).to_string(), "7");
    }

    #[test]
    fn test_node_id_hashable() {
        let mut set = HashSet::new();
        set.insert(NodeId(1));
        set.insert(NodeId(1));
        set.insert(NodeId(2));
        assert_eq!(set.len(), 2);
    }
}
