//! The rule record: one permission override for one identity at one node.

use serde::{Deserialize, Serialize};

use crate::mapping::IdentityMapping;
use crate::permission::{format_deltas, PermissionSet};
use crate::types::NodeId;

/// An immutable permission override.
///
/// `mask` records which bits the rule overrides; `value` records what they
/// are overridden to. A bit outside the mask is not overridden and always
/// carries a zero value bit (`value & !mask == 0`, enforced at
/// construction). Edits are expressed as store-level replace-or-delete
/// operations, never by mutating a rule in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    mapping: IdentityMapping,
    node: NodeId,
    mask: PermissionSet,
    value: PermissionSet,
}

impl Rule {
    /// Construct a rule. Value bits outside the mask carry no override and
    /// are dropped, so the `value & !mask == 0` invariant holds for every
    /// constructed rule.
    pub fn new(
        mapping: IdentityMapping,
        node: NodeId,
        mask: PermissionSet,
        value: PermissionSet,
    ) -> Self {
        Self {
            mapping,
            node,
            mask,
            value: value & mask,
        }
    }

    /// The identity this rule applies to.
    pub fn mapping(&self) -> &IdentityMapping {
        &self.mapping
    }

    /// The node this rule is attached to.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Which permission bits are overridden.
    pub fn mask(&self) -> PermissionSet {
        self.mask
    }

    /// What the overridden bits are set to.
    pub fn value(&self) -> PermissionSet {
        self.value
    }

    /// Apply this override to a base permission set: bits in the mask take
    /// the rule's value, all other bits pass through.
    pub fn apply(&self, base: PermissionSet) -> PermissionSet {
        (base & !self.mask) | self.value
    }

    /// Encode the override back into delta tokens (`"+read"`, `"-share"`).
    pub fn as_delta_tokens(&self) -> Vec<String> {
        format_deltas(self.mask, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::{parse_deltas, Permission};

    fn rule_from_tokens(tokens: &[&str]) -> Rule {
        let (mask, value) = parse_deltas(tokens).unwrap();
        Rule::new(IdentityMapping::user("alice"), NodeId(10), mask, value)
    }

    #[test]
    fn test_constructor_enforces_value_within_mask() {
        let rule = Rule::new(
            IdentityMapping::group("staff"),
            NodeId(1),
            PermissionSet::from(Permission::Read),
            PermissionSet::ALL,
        );
        assert_eq!(rule.value(), PermissionSet::from(Permission::Read));
        assert!((rule.value() & !rule.mask()).is_empty());
    }

    #[test]
    fn test_apply_overrides_only_masked_bits() {
        let rule = rule_from_tokens(&["-write", "+share"]);
        let base = PermissionSet::from(Permission::Read)
            .with(Permission::Write)
            .with(Permission::Delete);

        let effective = rule.apply(base);
        assert!(effective.contains(Permission::Read), "untouched bit kept");
        assert!(effective.contains(Permission::Delete), "untouched bit kept");
        assert!(!effective.contains(Permission::Write), "revoked by mask");
        assert!(effective.contains(Permission::Share), "granted by mask");
    }

    #[test]
    fn test_delta_token_roundtrip() {
        let tokens = ["+read", "-delete"];
        let rule = rule_from_tokens(&tokens);
        assert_eq!(rule.as_delta_tokens(), vec!["+read", "-delete"]);
    }

    #[test]
    fn test_serde_shape() {
        let rule = rule_from_tokens(&["+read", "-share"]);
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "mapping": {"kind": "user", "id": "alice"},
                "node": 10,
                "mask": 17,
                "value": 1,
            })
        );
        let back: Rule = serde_json::from_value(json).unwrap();
        assert_eq!(back, rule);
    }
}
