//! The folder permission context: entry point for one ACL query or
//! mutation request.

use std::sync::Arc;

use tracing::info;

use folder_acl_core::{parse_deltas, IdentityMapping, NodeId, PermissionSet, Rule};
use folder_acl_store::RuleStore;

use crate::error::{AclError, Result};
use crate::folder::{ManagedFolder, NodeLookup};
use crate::resolver;

/// The reserved token list `["clear"]` removes any existing rule for the
/// mapping at the path instead of storing one. It is a sentinel recognized
/// here, never a permission delta.
pub const CLEAR_SENTINEL: &str = "clear";

/// Result of applying a permission edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Any existing rule for the mapping at the node was removed.
    Cleared,
    /// The parsed rule was stored, replacing any prior rule for its key.
    Saved(Rule),
}

/// Entry point used by the controller layer for ACL requests against one
/// managed folder tree.
///
/// Both collaborators are explicit, injected dependencies: the rule store
/// and the node lookup arrive through the constructor, never through
/// ambient state, so tests substitute in-memory fakes freely.
///
/// Authorization is the caller's job: check
/// [`AclAuthorization`](crate::folder::AclAuthorization) before calling
/// [`apply_permission_edit`](Self::apply_permission_edit); the context
/// does not re-check it.
pub struct FolderPermissionContext<S, L> {
    store: Arc<S>,
    lookup: Arc<L>,
}

impl<S: RuleStore, L: NodeLookup> FolderPermissionContext<S, L> {
    /// Create a context over the given store and node lookup.
    pub fn new(store: Arc<S>, lookup: Arc<L>) -> Self {
        Self { store, lookup }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Trim the path and resolve it to a node id.
    async fn node_for(&self, folder: &ManagedFolder, path: &str) -> Result<NodeId> {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return Err(AclError::EmptyPath);
        }
        self.lookup
            .resolve_path(folder.id, trimmed)
            .await
            .ok_or_else(|| AclError::PathNotFound(trimmed.to_string()))
    }

    /// Apply one permission edit: store, replace, or clear the rule for
    /// `mapping` at `path`.
    ///
    /// `tokens` is either the literal `["clear"]` or an ordered list of
    /// permission deltas (`"+read"`, `"-share"`). Every validation runs
    /// before the store is touched, so a failed edit never leaves partial
    /// state behind. Repeating an edit with identical arguments succeeds
    /// and leaves the same stored rule (or absence of one).
    pub async fn apply_permission_edit(
        &self,
        folder: &ManagedFolder,
        path: &str,
        mapping: IdentityMapping,
        tokens: &[String],
    ) -> Result<EditOutcome> {
        if !folder.acl_enabled {
            return Err(AclError::AclDisabled(folder.id));
        }

        let node = self.node_for(folder, path).await?;

        if matches!(tokens, [t] if t == CLEAR_SENTINEL) {
            self.store.delete_rule(&mapping, node).await?;
            info!(folder = %folder.id, %mapping, %node, "cleared acl rule");
            return Ok(EditOutcome::Cleared);
        }

        let (mask, value) = parse_deltas(tokens)?;
        let rule = Rule::new(mapping, node, mask, value);
        self.store.save_rule(&rule).await?;
        info!(
            folder = %folder.id,
            mapping = %rule.mapping(),
            %node,
            mask = %rule.mask(),
            value = %rule.value(),
            "saved acl rule",
        );
        Ok(EditOutcome::Saved(rule))
    }

    /// The effective permissions at `path` for an actor described by
    /// `mappings`.
    ///
    /// `mappings` is the actor's identity set in precedence order, lowest
    /// first: groups, then the actor's own user mapping. With ACL disabled
    /// the folder baseline applies unchanged; otherwise the baseline is
    /// resolved against the rules attached to the node.
    pub async fn effective_permissions(
        &self,
        folder: &ManagedFolder,
        path: &str,
        mappings: &[IdentityMapping],
    ) -> Result<PermissionSet> {
        if !folder.acl_enabled {
            return Ok(folder.permissions);
        }

        let node = self.node_for(folder, path).await?;
        let effective =
            resolver::resolve_effective(self.store.as_ref(), node, folder.permissions, mappings)
                .await?;
        Ok(effective)
    }

    /// All rules attached to the node at `path`, across all mappings.
    pub async fn rules_for_path(&self, folder: &ManagedFolder, path: &str) -> Result<Vec<Rule>> {
        let node = self.node_for(folder, path).await?;
        Ok(self.store.get_rules_for_node(node).await?)
    }
}
