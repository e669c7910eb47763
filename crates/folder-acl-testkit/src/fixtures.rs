//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: an in-memory rule store, a
//! table-backed node lookup, and a table-backed authorization check.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use folder_acl::{AclAuthorization, FolderPermissionContext, ManagedFolder, NodeLookup};
use folder_acl_core::{FolderId, NodeId};
use folder_acl_store::MemoryRuleStore;

/// Node lookup backed by a mutable path table.
#[derive(Default)]
pub struct PathTable {
    nodes: RwLock<HashMap<(FolderId, String), NodeId>>,
}

impl PathTable {
    /// Register a path under a folder.
    pub fn insert(&self, folder: FolderId, path: &str, node: NodeId) {
        self.nodes
            .write()
            .unwrap()
            .insert((folder, path.to_string()), node);
    }

    /// Remove a path, as the host would when the entry is deleted.
    pub fn remove(&self, folder: FolderId, path: &str) -> Option<NodeId> {
        self.nodes.write().unwrap().remove(&(folder, path.to_string()))
    }
}

#[async_trait]
impl NodeLookup for PathTable {
    async fn resolve_path(&self, folder: FolderId, path: &str) -> Option<NodeId> {
        self.nodes.read().unwrap().get(&(folder, path.to_string())).copied()
    }
}

/// Authorization check backed by a mutable manager table.
#[derive(Default)]
pub struct ManagerTable {
    managers: RwLock<HashSet<(FolderId, String)>>,
}

impl ManagerTable {
    /// Grant ACL management on a folder to a user.
    pub fn allow(&self, folder: FolderId, user_id: &str) {
        self.managers
            .write()
            .unwrap()
            .insert((folder, user_id.to_string()));
    }
}

#[async_trait]
impl AclAuthorization for ManagerTable {
    async fn can_manage_acl(&self, folder: FolderId, user_id: &str) -> bool {
        self.managers
            .read()
            .unwrap()
            .contains(&(folder, user_id.to_string()))
    }
}

/// A test fixture with an in-memory store and table-backed collaborators.
pub struct AclFixture {
    pub store: Arc<MemoryRuleStore>,
    pub lookup: Arc<PathTable>,
    pub authz: Arc<ManagerTable>,
    next_node: AtomicI64,
}

impl AclFixture {
    /// Create a new empty fixture.
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryRuleStore::new()),
            lookup: Arc::new(PathTable::default()),
            authz: Arc::new(ManagerTable::default()),
            next_node: AtomicI64::new(100),
        }
    }

    /// A context wired to the fixture's store and lookup.
    pub fn context(&self) -> FolderPermissionContext<MemoryRuleStore, PathTable> {
        FolderPermissionContext::new(Arc::clone(&self.store), Arc::clone(&self.lookup))
    }

    /// An ACL-enabled folder descriptor.
    pub fn folder(&self, id: i64, mount_point: &str) -> ManagedFolder {
        ManagedFolder::new(FolderId(id), mount_point).with_acl(true)
    }

    /// Register a path and assign it a fresh node id.
    pub fn add_path(&self, folder: FolderId, path: &str) -> NodeId {
        let node = NodeId(self.next_node.fetch_add(1, Ordering::Relaxed));
        self.lookup.insert(folder, path, node);
        node
    }

    /// Grant ACL management on a folder to a user.
    pub fn allow_manager(&self, folder: FolderId, user_id: &str) {
        self.authz.allow(folder, user_id);
    }
}

impl Default for AclFixture {
    fn default() -> Self {
        Self::new()
    }
}
