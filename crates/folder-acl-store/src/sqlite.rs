//! SQLite implementation of the RuleStore trait.
//!
//! This is the primary storage backend for the folder ACL engine. It uses
//! rusqlite with bundled SQLite, wrapped in async via tokio::spawn_blocking.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use folder_acl_core::{IdentityMapping, MappingKind, NodeId, PermissionSet, Rule};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{RuleStore, SaveResult};

/// SQLite-based rule store.
///
/// Thread-safe via internal Mutex. All operations run on the blocking pool
/// to avoid stalling the async runtime. The mutex serializes every
/// operation against the single connection; the upsert itself is one SQL
/// statement, so a rule row is never observable with the mask of one write
/// and the value of another.
pub struct SqliteRuleStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRuleStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path.as_ref())?;
        migration::migrate(&mut conn)?;
        debug!(path = %path.as_ref().display(), "opened rule database");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a closure against the connection on the blocking pool.
    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| StoreError::Unavailable("connection mutex poisoned".to_string()))?;
            f(&conn)
        })
        .await
        .map_err(|e| StoreError::Unavailable(format!("storage task failed: {}", e)))?
    }
}

// Helper to convert a row to Rule
fn row_to_rule(row: &rusqlite::Row<'_>) -> rusqlite::Result<Rule> {
    let kind: String = row.get("mapping_kind")?;
    let id: String = row.get("mapping_id")?;
    let node: i64 = row.get("node_id")?;
    let mask: u32 = row.get("mask")?;
    let permissions: u32 = row.get("permissions")?;

    let kind = match kind.as_str() {
        "user" => MappingKind::User,
        "group" => MappingKind::Group,
        _ => {
            return Err(rusqlite::Error::InvalidColumnType(
                0,
                "mapping_kind".into(),
                rusqlite::types::Type::Text,
            ))
        }
    };

    Ok(Rule::new(
        IdentityMapping { kind, id },
        NodeId(node),
        PermissionSet::from_bits(mask),
        PermissionSet::from_bits(permissions),
    ))
}

#[async_trait]
impl RuleStore for SqliteRuleStore {
    async fn save_rule(&self, rule: &Rule) -> Result<SaveResult> {
        let rule = rule.clone();

        self.with_conn(move |conn| {
            let existing: Option<i64> = conn
                .query_row(
                    "SELECT node_id FROM acl_rules
                     WHERE mapping_kind = ?1 AND mapping_id = ?2 AND node_id = ?3",
                    params![
                        rule.mapping().kind.as_str(),
                        rule.mapping().id,
                        rule.node().get(),
                    ],
                    |row| row.get(0),
                )
                .optional()?;

            // Single-statement upsert by the natural key
            conn.execute(
                "INSERT INTO acl_rules (mapping_kind, mapping_id, node_id, mask, permissions)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(mapping_kind, mapping_id, node_id)
                 DO UPDATE SET mask = excluded.mask, permissions = excluded.permissions",
                params![
                    rule.mapping().kind.as_str(),
                    rule.mapping().id,
                    rule.node().get(),
                    rule.mask().bits(),
                    rule.value().bits(),
                ],
            )?;

            Ok(if existing.is_some() {
                SaveResult::Replaced
            } else {
                SaveResult::Created
            })
        })
        .await
    }

    async fn delete_rule(&self, mapping: &IdentityMapping, node: NodeId) -> Result<bool> {
        let mapping = mapping.clone();

        self.with_conn(move |conn| {
            let removed = conn.execute(
                "DELETE FROM acl_rules
                 WHERE mapping_kind = ?1 AND mapping_id = ?2 AND node_id = ?3",
                params![mapping.kind.as_str(), mapping.id, node.get()],
            )?;
            Ok(removed > 0)
        })
        .await
    }

    async fn get_rule(&self, mapping: &IdentityMapping, node: NodeId) -> Result<Option<Rule>> {
        let mapping = mapping.clone();

        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT mapping_kind, mapping_id, node_id, mask, permissions
                 FROM acl_rules
                 WHERE mapping_kind = ?1 AND mapping_id = ?2 AND node_id = ?3",
                params![mapping.kind.as_str(), mapping.id, node.get()],
                row_to_rule,
            )
            .optional()
            .map_err(StoreError::from)
        })
        .await
    }

    async fn get_rules_for_node(&self, node: NodeId) -> Result<Vec<Rule>> {
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT mapping_kind, mapping_id, node_id, mask, permissions
                 FROM acl_rules WHERE node_id = ?1
                 ORDER BY mapping_kind, mapping_id",
            )?;

            let rules = stmt
                .query_map(params![node.get()], row_to_rule)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(rules)
        })
        .await
    }

    async fn get_rules_for_nodes(
        &self,
        nodes: &[NodeId],
    ) -> Result<HashMap<NodeId, Vec<Rule>>> {
        let nodes = nodes.to_vec();

        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT mapping_kind, mapping_id, node_id, mask, permissions
                 FROM acl_rules WHERE node_id = ?1
                 ORDER BY mapping_kind, mapping_id",
            )?;

            let mut map = HashMap::new();
            for node in nodes {
                let rules = stmt
                    .query_map(params![node.get()], row_to_rule)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                if !rules.is_empty() {
                    map.insert(node, rules);
                }
            }
            Ok(map)
        })
        .await
    }

    async fn delete_rules_for_nodes(&self, nodes: &[NodeId]) -> Result<u64> {
        let nodes = nodes.to_vec();

        self.with_conn(move |conn| {
            let mut stmt = conn.prepare("DELETE FROM acl_rules WHERE node_id = ?1")?;

            let mut removed = 0u64;
            for node in nodes {
                removed += stmt.execute(params![node.get()])? as u64;
            }
            Ok(removed)
        })
        .await
    }

    async fn delete_rules_for_mapping(&self, mapping: &IdentityMapping) -> Result<u64> {
        let mapping = mapping.clone();

        self.with_conn(move |conn| {
            let removed = conn.execute(
                "DELETE FROM acl_rules WHERE mapping_kind = ?1 AND mapping_id = ?2",
                params![mapping.kind.as_str(), mapping.id],
            )?;
            Ok(removed as u64)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folder_acl_core::parse_deltas;

    fn rule(mapping: IdentityMapping, node: i64, tokens: &[&str]) -> Rule {
        let (mask, value) = parse_deltas(tokens).unwrap();
        Rule::new(mapping, NodeId(node), mask, value)
    }

    #[tokio::test]
    async fn test_save_and_get_rule() {
        let store = SqliteRuleStore::open_memory().unwrap();
        let r = rule(IdentityMapping::user("alice"), 1, &["+read", "-share"]);

        assert_eq!(store.save_rule(&r).await.unwrap(), SaveResult::Created);

        let got = store
            .get_rule(&IdentityMapping::user("alice"), NodeId(1))
            .await
            .unwrap();
        assert_eq!(got, Some(r));
    }

    #[tokio::test]
    async fn test_upsert_replaces() {
        let store = SqliteRuleStore::open_memory().unwrap();
        let first = rule(IdentityMapping::group("staff"), 1, &["+read"]);
        let second = rule(IdentityMapping::group("staff"), 1, &["-read"]);

        assert_eq!(store.save_rule(&first).await.unwrap(), SaveResult::Created);
        assert_eq!(store.save_rule(&second).await.unwrap(), SaveResult::Replaced);

        // Replacement, not accumulation
        let rules = store.get_rules_for_node(NodeId(1)).await.unwrap();
        assert_eq!(rules, vec![second]);
    }

    #[tokio::test]
    async fn test_save_identical_rule_idempotent() {
        let store = SqliteRuleStore::open_memory().unwrap();
        let r = rule(IdentityMapping::user("alice"), 1, &["+read"]);

        store.save_rule(&r).await.unwrap();
        store.save_rule(&r).await.unwrap();

        let rules = store.get_rules_for_node(NodeId(1)).await.unwrap();
        assert_eq!(rules, vec![r]);
    }

    #[tokio::test]
    async fn test_delete_rule() {
        let store = SqliteRuleStore::open_memory().unwrap();
        let alice = IdentityMapping::user("alice");
        store.save_rule(&rule(alice.clone(), 1, &["+read"])).await.unwrap();

        assert!(store.delete_rule(&alice, NodeId(1)).await.unwrap());
        assert_eq!(store.get_rule(&alice, NodeId(1)).await.unwrap(), None);

        // Repeated delete is a no-op, not an error
        assert!(!store.delete_rule(&alice, NodeId(1)).await.unwrap());
    }

    #[tokio::test]
    async fn test_rules_for_node_across_mappings() {
        let store = SqliteRuleStore::open_memory().unwrap();
        store
            .save_rule(&rule(IdentityMapping::user("zoe"), 1, &["+read"]))
            .await
            .unwrap();
        store
            .save_rule(&rule(IdentityMapping::group("staff"), 1, &["-write"]))
            .await
            .unwrap();
        store
            .save_rule(&rule(IdentityMapping::user("zoe"), 2, &["+share"]))
            .await
            .unwrap();

        let rules = store.get_rules_for_node(NodeId(1)).await.unwrap();
        let keys: Vec<String> = rules.iter().map(|r| r.mapping().to_string()).collect();
        assert_eq!(keys, vec!["group:staff", "user:zoe"]);
    }

    #[tokio::test]
    async fn test_batch_lookup() {
        let store = SqliteRuleStore::open_memory().unwrap();
        store
            .save_rule(&rule(IdentityMapping::user("alice"), 1, &["+read"]))
            .await
            .unwrap();
        store
            .save_rule(&rule(IdentityMapping::user("alice"), 3, &["-read"]))
            .await
            .unwrap();

        let map = store
            .get_rules_for_nodes(&[NodeId(1), NodeId(2), NodeId(3)])
            .await
            .unwrap();
        assert_eq!(map.len(), 2);
        assert!(map.contains_key(&NodeId(1)));
        assert!(!map.contains_key(&NodeId(2)));
    }

    #[tokio::test]
    async fn test_cascade_deletes() {
        let store = SqliteRuleStore::open_memory().unwrap();
        let alice = IdentityMapping::user("alice");
        store.save_rule(&rule(alice.clone(), 1, &["+read"])).await.unwrap();
        store.save_rule(&rule(alice.clone(), 2, &["+read"])).await.unwrap();
        store
            .save_rule(&rule(IdentityMapping::group("staff"), 1, &["+read"]))
            .await
            .unwrap();

        assert_eq!(store.delete_rules_for_nodes(&[NodeId(1)]).await.unwrap(), 2);
        assert_eq!(store.delete_rules_for_mapping(&alice).await.unwrap(), 1);
        assert!(store.get_rules_for_node(NodeId(1)).await.unwrap().is_empty());
        assert!(store.get_rules_for_node(NodeId(2)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rules_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acl.db");
        let r = rule(IdentityMapping::group("staff"), 7, &["+read", "+write"]);

        {
            let store = SqliteRuleStore::open(&path).unwrap();
            store.save_rule(&r).await.unwrap();
        }

        let store = SqliteRuleStore::open(&path).unwrap();
        let got = store
            .get_rule(&IdentityMapping::group("staff"), NodeId(7))
            .await
            .unwrap();
        assert_eq!(got, Some(r));
    }
}
