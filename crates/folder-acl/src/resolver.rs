//! Effective permission computation.
//!
//! The effective permission for a node is derived on demand, never stored:
//! the folder baseline with each applicable rule's override applied in
//! mapping order.

use std::collections::HashMap;

use folder_acl_core::{IdentityMapping, NodeId, PermissionSet, Rule};
use folder_acl_store::{RuleStore, StoreError};

/// Fold a node's rules over a baseline permission set.
///
/// `mappings` is the precedence order, lowest first: for each mapping that
/// has a rule in `rules`, the rule overrides the bits its mask covers, so
/// a later mapping wins on any bit two rules both touch. Callers put the
/// acting user's groups first and the user's own mapping last, making
/// personal overrides beat group overrides.
///
/// `rules` must all belong to the same node. Pure function, no I/O.
pub fn effective_permissions(
    baseline: PermissionSet,
    mappings: &[IdentityMapping],
    rules: &[Rule],
) -> PermissionSet {
    let by_mapping: HashMap<&IdentityMapping, &Rule> =
        rules.iter().map(|rule| (rule.mapping(), rule)).collect();

    mappings
        .iter()
        .fold(baseline, |acc, mapping| match by_mapping.get(mapping) {
            Some(rule) => rule.apply(acc),
            None => acc,
        })
}

/// Fetch the rules attached to `node` and fold them over `baseline`.
///
/// One store read; everything else is [`effective_permissions`].
pub async fn resolve_effective<S: RuleStore + ?Sized>(
    store: &S,
    node: NodeId,
    baseline: PermissionSet,
    mappings: &[IdentityMapping],
) -> Result<PermissionSet, StoreError> {
    let rules = store.get_rules_for_node(node).await?;
    Ok(effective_permissions(baseline, mappings, &rules))
}
