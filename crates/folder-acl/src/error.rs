//! Error types for ACL operations.

use folder_acl_core::{FolderId, ParseError};
use folder_acl_store::StoreError;
use thiserror::Error;

/// Errors that can occur during ACL queries and mutations.
///
/// All of these are recoverable, request-scoped failures, reported back to
/// the caller as structured results. Only [`AclError::Store`] wrapping
/// [`StoreError::Unavailable`] warrants a caller-side retry; the engine
/// never retries internally.
#[derive(Debug, Error)]
pub enum AclError {
    /// Mutation attempted on a folder with ACL support turned off.
    #[error("advanced permissions not enabled for folder {0}")]
    AclDisabled(FolderId),

    /// The path is empty after trimming separators.
    #[error("path is empty")]
    EmptyPath,

    /// The path does not resolve to a node inside the folder's tree.
    #[error("path not found in folder: {0}")]
    PathNotFound(String),

    /// The permission delta tokens could not be parsed.
    #[error("invalid permission: {0}")]
    InvalidPermission(#[from] ParseError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for ACL operations.
pub type Result<T> = std::result::Result<T, AclError>;
