//! # Folder ACL
//!
//! Fine-grained access control for shared folder trees: per-path,
//! per-identity permission overrides resolved against a baseline group
//! permission.
//!
//! ## Overview
//!
//! A managed folder grants its applicable groups a baseline permission
//! set. ACL rules refine that baseline per filesystem node: each rule
//! records, for one user or group at one node, which permission bits are
//! overridden and what they are set to. The effective permission for an
//! actor is computed on demand by folding the actor's mappings over the
//! baseline, groups first and the actor's own user mapping last.
//!
//! ## Key Types
//!
//! - [`FolderPermissionContext`] - entry point for edits and queries
//! - [`ManagedFolder`] - read-only folder descriptor from the folder
//!   manager
//! - [`NodeLookup`] / [`AclAuthorization`] - collaborator interfaces
//!   supplied by the host
//! - [`AclError`] - the request-scoped error taxonomy
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use folder_acl::store::SqliteRuleStore;
//! use folder_acl::{
//!     FolderId, FolderPermissionContext, IdentityMapping, ManagedFolder, NodeId, NodeLookup,
//! };
//!
//! /// Resolves paths through the host's filesystem cache.
//! struct CacheLookup;
//!
//! #[async_trait]
//! impl NodeLookup for CacheLookup {
//!     async fn resolve_path(&self, _folder: FolderId, _path: &str) -> Option<NodeId> {
//!         Some(NodeId(42))
//!     }
//! }
//!
//! async fn example() {
//!     let store = Arc::new(SqliteRuleStore::open("acl.db").unwrap());
//!     let context = FolderPermissionContext::new(store, Arc::new(CacheLookup));
//!
//!     let folder = ManagedFolder::new(FolderId(1), "projects").with_acl(true);
//!     let tokens: Vec<String> = vec!["+read".into(), "-share".into()];
//!     context
//!         .apply_permission_edit(
//!             &folder,
//!             "docs/plan.md",
//!             IdentityMapping::group("staff"),
//!             &tokens,
//!         )
//!         .await
//!         .unwrap();
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `folder_acl::core` - core types (rules, mappings, bitmasks)
//! - `folder_acl::store` - rule persistence (SQLite and in-memory)

pub mod context;
pub mod error;
pub mod folder;
pub mod resolver;

// Re-export component crates
pub use folder_acl_core as core;
pub use folder_acl_store as store;

// Re-export main types for convenience
pub use context::{EditOutcome, FolderPermissionContext, CLEAR_SENTINEL};
pub use error::{AclError, Result};
pub use folder::{AclAuthorization, ManagedFolder, NodeLookup, QUOTA_UNLIMITED};
pub use resolver::{effective_permissions, resolve_effective};

// Re-export commonly used core types
pub use folder_acl_core::{
    FolderId, IdentityMapping, MappingKind, NodeId, ParseError, Permission, PermissionSet, Rule,
};
