//! Proptest generators for property-based testing.

use proptest::prelude::*;

use folder_acl_core::{IdentityMapping, MappingKind, NodeId, Permission, PermissionSet, Rule};

/// Generate a single permission.
pub fn permission() -> impl Strategy<Value = Permission> {
    prop::sample::select(Permission::ALL.to_vec())
}

/// Generate an arbitrary permission set (within the defined universe).
pub fn permission_set() -> impl Strategy<Value = PermissionSet> {
    any::<u32>().prop_map(PermissionSet::from_bits)
}

/// Generate a well-formed delta token (`"+read"`, `"-share"`, ...).
pub fn delta_token() -> impl Strategy<Value = String> {
    (permission(), any::<bool>()).prop_map(|(p, grant)| {
        format!("{}{}", if grant { '+' } else { '-' }, p.name())
    })
}

/// Generate an ordered list of well-formed delta tokens.
///
/// Duplicates referencing the same bit are deliberately possible; the
/// later token wins.
pub fn delta_tokens(max_len: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(delta_token(), 1..=max_len)
}

/// Generate a mapping kind.
pub fn mapping_kind() -> impl Strategy<Value = MappingKind> {
    prop_oneof![Just(MappingKind::User), Just(MappingKind::Group)]
}

/// Generate an opaque mapping identifier.
pub fn mapping_id() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,15}".prop_map(String::from)
}

/// Generate an identity mapping.
pub fn identity_mapping() -> impl Strategy<Value = IdentityMapping> {
    (mapping_kind(), mapping_id()).prop_map(|(kind, id)| IdentityMapping { kind, id })
}

/// Generate a node id.
pub fn node_id() -> impl Strategy<Value = NodeId> {
    (1i64..=100_000i64).prop_map(NodeId)
}

/// Generate a rule. The constructor keeps the value within the mask, so
/// every generated rule satisfies the store invariant.
pub fn rule() -> impl Strategy<Value = Rule> {
    (identity_mapping(), node_id(), permission_set(), permission_set())
        .prop_map(|(mapping, node, mask, value)| Rule::new(mapping, node, mask, value))
}
