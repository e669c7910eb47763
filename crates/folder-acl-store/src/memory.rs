//! In-memory implementation of the RuleStore trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;
use folder_acl_core::{IdentityMapping, NodeId, Rule};

use crate::error::Result;
use crate::traits::{RuleStore, SaveResult};

/// In-memory rule store.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryRuleStore {
    inner: RwLock<MemoryInner>,
}

struct MemoryInner {
    /// Rules indexed by their natural key.
    rules: HashMap<(IdentityMapping, NodeId), Rule>,

    /// Node index: node -> mappings with a rule there.
    by_node: HashMap<NodeId, HashSet<IdentityMapping>>,
}

impl MemoryRuleStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryInner {
                rules: HashMap::new(),
                by_node: HashMap::new(),
            }),
        }
    }
}

impl Default for MemoryRuleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryInner {
    fn rules_for_node(&self, node: NodeId) -> Vec<Rule> {
        let Some(mappings) = self.by_node.get(&node) else {
            return Vec::new();
        };
        let mut rules: Vec<Rule> = mappings
            .iter()
            .filter_map(|m| self.rules.get(&(m.clone(), node)).cloned())
            .collect();
        rules.sort_by(|a, b| {
            (a.mapping().kind.as_str(), &a.mapping().id)
                .cmp(&(b.mapping().kind.as_str(), &b.mapping().id))
        });
        rules
    }

    fn remove(&mut self, mapping: &IdentityMapping, node: NodeId) -> bool {
        let existed = self.rules.remove(&(mapping.clone(), node)).is_some();
        if existed {
            if let Some(mappings) = self.by_node.get_mut(&node) {
                mappings.remove(mapping);
                if mappings.is_empty() {
                    self.by_node.remove(&node);
                }
            }
        }
        existed
    }
}

#[async_trait]
impl RuleStore for MemoryRuleStore {
    async fn save_rule(&self, rule: &Rule) -> Result<SaveResult> {
        let mut inner = self.inner.write().unwrap();

        let key = (rule.mapping().clone(), rule.node());
        inner
            .by_node
            .entry(rule.node())
            .or_default()
            .insert(rule.mapping().clone());

        match inner.rules.insert(key, rule.clone()) {
            Some(_) => Ok(SaveResult::Replaced),
            None => Ok(SaveResult::Created),
        }
    }

    async fn delete_rule(&self, mapping: &IdentityMapping, node: NodeId) -> Result<bool> {
        let mut inner = self.inner.write().unwrap();
        Ok(inner.remove(mapping, node))
    }

    async fn get_rule(&self, mapping: &IdentityMapping, node: NodeId) -> Result<Option<Rule>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.rules.get(&(mapping.clone(), node)).cloned())
    }

    async fn get_rules_for_node(&self, node: NodeId) -> Result<Vec<Rule>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.rules_for_node(node))
    }

    async fn get_rules_for_nodes(
        &self,
        nodes: &[NodeId],
    ) -> Result<HashMap<NodeId, Vec<Rule>>> {
        let inner = self.inner.read().unwrap();

        let mut map = HashMap::new();
        for &node in nodes {
            let rules = inner.rules_for_node(node);
            if !rules.is_empty() {
                map.insert(node, rules);
            }
        }
        Ok(map)
    }

    async fn delete_rules_for_nodes(&self, nodes: &[NodeId]) -> Result<u64> {
        let mut inner = self.inner.write().unwrap();

        let mut removed = 0u64;
        for &node in nodes {
            let mappings: Vec<IdentityMapping> = inner
                .by_node
                .get(&node)
                .map(|m| m.iter().cloned().collect())
                .unwrap_or_default();
            for mapping in mappings {
                if inner.remove(&mapping, node) {
                    removed += 1;
                }
            }
        }
        Ok(removed)
    }

    async fn delete_rules_for_mapping(&self, mapping: &IdentityMapping) -> Result<u64> {
        let mut inner = self.inner.write().unwrap();

        let nodes: Vec<NodeId> = inner
            .rules
            .keys()
            .filter(|(m, _)| m == mapping)
            .map(|(_, node)| *node)
            .collect();
        let mut removed = 0u64;
        for node in nodes {
            if inner.remove(mapping, node) {
                removed += 1;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folder_acl_core::{parse_deltas, PermissionSet};

    fn rule(mapping: IdentityMapping, node: i64, tokens: &[&str]) -> Rule {
        let (mask, value) = parse_deltas(tokens).unwrap();
        Rule::new(mapping, NodeId(node), mask, value)
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let store = MemoryRuleStore::new();
        let r = rule(IdentityMapping::user("alice"), 1, &["+read"]);

        assert_eq!(store.save_rule(&r).await.unwrap(), SaveResult::Created);
        let got = store
            .get_rule(&IdentityMapping::user("alice"), NodeId(1))
            .await
            .unwrap();
        assert_eq!(got, Some(r));
    }

    #[tokio::test]
    async fn test_save_replaces_by_key() {
        let store = MemoryRuleStore::new();
        let first = rule(IdentityMapping::group("staff"), 1, &["+read"]);
        let second = rule(IdentityMapping::group("staff"), 1, &["-read", "+share"]);

        store.save_rule(&first).await.unwrap();
        assert_eq!(store.save_rule(&second).await.unwrap(), SaveResult::Replaced);

        let rules = store.get_rules_for_node(NodeId(1)).await.unwrap();
        assert_eq!(rules, vec![second]);
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let store = MemoryRuleStore::new();
        let existed = store
            .delete_rule(&IdentityMapping::user("alice"), NodeId(9))
            .await
            .unwrap();
        assert!(!existed);
    }

    #[tokio::test]
    async fn test_rules_for_node_ordering() {
        let store = MemoryRuleStore::new();
        store
            .save_rule(&rule(IdentityMapping::user("zoe"), 1, &["+read"]))
            .await
            .unwrap();
        store
            .save_rule(&rule(IdentityMapping::group("staff"), 1, &["+write"]))
            .await
            .unwrap();
        store
            .save_rule(&rule(IdentityMapping::group("admins"), 1, &["+share"]))
            .await
            .unwrap();

        let rules = store.get_rules_for_node(NodeId(1)).await.unwrap();
        let keys: Vec<String> = rules.iter().map(|r| r.mapping().to_string()).collect();
        assert_eq!(keys, vec!["group:admins", "group:staff", "user:zoe"]);
    }

    #[tokio::test]
    async fn test_cascade_delete_for_nodes() {
        let store = MemoryRuleStore::new();
        store
            .save_rule(&rule(IdentityMapping::user("alice"), 1, &["+read"]))
            .await
            .unwrap();
        store
            .save_rule(&rule(IdentityMapping::group("staff"), 1, &["+read"]))
            .await
            .unwrap();
        store
            .save_rule(&rule(IdentityMapping::user("alice"), 2, &["+read"]))
            .await
            .unwrap();

        let removed = store.delete_rules_for_nodes(&[NodeId(1)]).await.unwrap();
        assert_eq!(removed, 2);
        assert!(store.get_rules_for_node(NodeId(1)).await.unwrap().is_empty());
        assert_eq!(store.get_rules_for_node(NodeId(2)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cascade_delete_for_mapping() {
        let store = MemoryRuleStore::new();
        let alice = IdentityMapping::user("alice");
        store.save_rule(&rule(alice.clone(), 1, &["+read"])).await.unwrap();
        store.save_rule(&rule(alice.clone(), 2, &["-share"])).await.unwrap();
        store
            .save_rule(&rule(IdentityMapping::group("staff"), 1, &["+read"]))
            .await
            .unwrap();

        let removed = store.delete_rules_for_mapping(&alice).await.unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.get_rule(&alice, NodeId(1)).await.unwrap(), None);
        assert_eq!(store.get_rules_for_node(NodeId(1)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_stored_rule_invariant() {
        let store = MemoryRuleStore::new();
        let r = rule(IdentityMapping::user("alice"), 1, &["+read", "-write"]);
        store.save_rule(&r).await.unwrap();

        let got = store
            .get_rule(&IdentityMapping::user("alice"), NodeId(1))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(got.value() & !got.mask(), PermissionSet::EMPTY);
    }
}
