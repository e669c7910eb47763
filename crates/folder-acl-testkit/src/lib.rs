//! # Folder ACL Testkit
//!
//! Testing utilities for the folder ACL engine.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: an in-memory store, a table-backed node lookup, and a
//!   table-backed authorization check, wired into a ready-to-use context
//! - **Generators**: proptest strategies for permissions, delta tokens,
//!   mappings, and rules
//!
//! ## Test Fixtures
//!
//! Quickly set up test scenarios:
//!
//! ```rust
//! use folder_acl_testkit::fixtures::AclFixture;
//!
//! let fixture = AclFixture::new();
//! let folder = fixture.folder(1, "projects");
//! let _node = fixture.add_path(folder.id, "docs/plan.md");
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use folder_acl_core::parse_deltas;
//! use folder_acl_testkit::generators::delta_tokens;
//!
//! proptest! {
//!     #[test]
//!     fn parse_never_panics(tokens in delta_tokens(8)) {
//!         parse_deltas(&tokens).unwrap();
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{AclFixture, ManagerTable, PathTable};
