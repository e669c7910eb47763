//! # Folder ACL Store
//!
//! Rule persistence for the folder ACL engine. Provides a trait-based
//! interface for rule storage with SQLite and in-memory implementations.
//!
//! ## Overview
//!
//! Rules are keyed by their natural key `(mapping, node)`: at most one rule
//! exists per identity per filesystem node. The store abstracts persistence
//! behind the [`RuleStore`] trait; the primary implementation is
//! [`SqliteRuleStore`], with [`MemoryRuleStore`] for tests.
//!
//! ## Key Types
//!
//! - [`RuleStore`] - The async trait for all rule storage operations
//! - [`SqliteRuleStore`] - SQLite-based persistent storage
//! - [`MemoryRuleStore`] - In-memory storage for tests
//! - [`SaveResult`] - Whether a save created or replaced a rule
//!
//! ## Design Notes
//!
//! - **Upsert semantics**: saving a rule replaces any prior rule for the
//!   same `(mapping, node)` key in a single atomic operation; concurrent
//!   writers can never produce a rule with the mask of one write and the
//!   value of another.
//! - **Idempotent deletes**: deleting a rule that does not exist is a
//!   no-op, not an error.
//! - **Cascade hooks**: node and mapping removal flow through
//!   `delete_rules_for_nodes` / `delete_rules_for_mapping`, owned by the
//!   store rather than its callers.

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryRuleStore;
pub use sqlite::SqliteRuleStore;
pub use traits::{RuleStore, SaveResult};
