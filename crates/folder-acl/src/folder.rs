//! Managed folder descriptor and collaborator interfaces.
//!
//! The ACL engine does not mount folders, walk filesystem trees, or decide
//! group membership. Those concerns live behind the narrow interfaces
//! defined here, supplied by the surrounding folder-management subsystem.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use folder_acl_core::{FolderId, NodeId, PermissionSet};

/// Quota sentinel meaning "no limit", as used by the surrounding storage
/// layer.
pub const QUOTA_UNLIMITED: i64 = -3;

/// Descriptor of a managed folder.
///
/// Owned and mutated by the folder-management subsystem; read-only to this
/// engine. `permissions` is the baseline granted to applicable groups
/// before any ACL override is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedFolder {
    pub id: FolderId,
    pub mount_point: String,
    pub quota: i64,
    pub acl_enabled: bool,
    pub permissions: PermissionSet,
}

impl ManagedFolder {
    /// A folder with no quota limit, ACL disabled, and the full baseline.
    pub fn new(id: FolderId, mount_point: impl Into<String>) -> Self {
        Self {
            id,
            mount_point: mount_point.into(),
            quota: QUOTA_UNLIMITED,
            acl_enabled: false,
            permissions: PermissionSet::ALL,
        }
    }

    /// Set the quota in bytes.
    pub fn with_quota(mut self, quota: i64) -> Self {
        self.quota = quota;
        self
    }

    /// Enable or disable ACL support.
    pub fn with_acl(mut self, enabled: bool) -> Self {
        self.acl_enabled = enabled;
        self
    }

    /// Set the baseline permissions.
    pub fn with_permissions(mut self, permissions: PermissionSet) -> Self {
        self.permissions = permissions;
        self
    }
}

/// Node lookup: maps paths inside a managed folder's tree to stable node
/// ids.
///
/// Paths are resolved to ids once per request; rules are keyed on the
/// resulting [`NodeId`], never on the path string, so renames cannot race
/// rule edits.
#[async_trait]
pub trait NodeLookup: Send + Sync {
    /// Resolve a trimmed relative path to its node id, or `None` if no
    /// such entry exists in the folder's tree.
    async fn resolve_path(&self, folder: FolderId, path: &str) -> Option<NodeId>;
}

/// Authorization check for ACL management.
///
/// Gates who may edit rules on a folder. Callers check this before
/// invoking [`apply_permission_edit`]; the engine itself assumes the check
/// already passed and does not repeat it.
///
/// [`apply_permission_edit`]: crate::context::FolderPermissionContext::apply_permission_edit
#[async_trait]
pub trait AclAuthorization: Send + Sync {
    /// Whether the acting user may manage ACL rules on the folder.
    async fn can_manage_acl(&self, folder: FolderId, user_id: &str) -> bool;
}
