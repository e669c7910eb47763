//! # Folder ACL Core
//!
//! Core types for the folder ACL engine.
//!
//! ## Overview
//!
//! Access control for shared folder trees is expressed as per-node,
//! per-identity permission overrides. This crate defines the vocabulary:
//!
//! - **Permission / PermissionSet**: the closed set of capability bits and
//!   the bitmask over them
//! - **IdentityMapping**: a `(kind, id)` reference to a user or a group
//! - **Rule**: an immutable `(mapping, node, mask, value)` override record
//!
//! Parsing between the human-facing delta token format (`"+read"`,
//! `"-share"`) and bitmask pairs lives in [`permission`], with
//! [`format_deltas`] as the symmetric encoder.
//!
//! No I/O happens here; persistence and resolution live in the
//! `folder-acl-store` and `folder-acl` crates.

pub mod error;
pub mod mapping;
pub mod permission;
pub mod rule;
pub mod types;

pub use error::ParseError;
pub use mapping::{IdentityMapping, MappingKind};
pub use permission::{format_deltas, parse_delta, parse_deltas, Permission, PermissionSet};
pub use rule::Rule;
pub use types::{FolderId, NodeId};
