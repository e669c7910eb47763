//! Store trait: the abstract interface for rule persistence.
//!
//! This trait allows the engine to be storage-agnostic. Implementations
//! include SQLite (primary) and in-memory (for tests).

use std::collections::HashMap;

use async_trait::async_trait;
use folder_acl_core::{IdentityMapping, NodeId, Rule};

use crate::error::Result;

/// Result of saving a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveResult {
    /// No rule existed for the key; a new one was stored.
    Created,
    /// A rule already existed for the key and was replaced.
    Replaced,
}

/// The RuleStore trait: async interface for rule persistence.
///
/// All methods are async to support both sync (SQLite) and async backends.
/// For SQLite, we use `spawn_blocking` internally to avoid blocking the
/// runtime.
///
/// # Design Notes
///
/// - **Natural key**: at most one rule exists per `(mapping, node)` pair;
///   [`save_rule`](RuleStore::save_rule) upserts by that key atomically.
/// - **Idempotent deletes**: deleting an absent rule returns `Ok(false)`.
/// - **Read consistency**: readers observe either the pre- or post-state
///   of a concurrent save, never a rule with mask and value from two
///   different writes.
#[async_trait]
pub trait RuleStore: Send + Sync {
    /// Upsert a rule by its `(mapping, node)` key.
    ///
    /// Replaces any prior rule for the key in one atomic operation.
    async fn save_rule(&self, rule: &Rule) -> Result<SaveResult>;

    /// Remove the rule for `(mapping, node)`, if any.
    ///
    /// Returns whether a rule existed. Mask and value play no part in rule
    /// identity, so the key is taken directly.
    async fn delete_rule(&self, mapping: &IdentityMapping, node: NodeId) -> Result<bool>;

    /// Get the rule for `(mapping, node)`, if any.
    async fn get_rule(&self, mapping: &IdentityMapping, node: NodeId) -> Result<Option<Rule>>;

    /// All rules attached to one node, across all mappings.
    ///
    /// Ordered by mapping kind then id, so results are stable across
    /// backends.
    async fn get_rules_for_node(&self, node: NodeId) -> Result<Vec<Rule>>;

    /// Batch lookup: rules for each of the given nodes.
    ///
    /// Nodes without rules are absent from the returned map.
    async fn get_rules_for_nodes(
        &self,
        nodes: &[NodeId],
    ) -> Result<HashMap<NodeId, Vec<Rule>>>;

    /// Cascade hook: remove every rule attached to the given nodes.
    ///
    /// Called when nodes (or a whole managed folder's tree) are removed.
    /// Returns the number of rules deleted.
    async fn delete_rules_for_nodes(&self, nodes: &[NodeId]) -> Result<u64>;

    /// Cascade hook: remove every rule for one identity, across all nodes.
    ///
    /// Called when a user or group is deleted. Returns the number of rules
    /// deleted.
    async fn delete_rules_for_mapping(&self, mapping: &IdentityMapping) -> Result<u64>;
}
