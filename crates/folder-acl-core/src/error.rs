//! Error types for parsing permission deltas.

use thiserror::Error;

/// Errors produced while parsing permission delta tokens.
///
/// Both kinds are user-reportable: the edit surface echoes them back to the
/// caller verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The token does not start with `+` or `-`.
    #[error("incorrect format for permission {0:?}, expected \"+name\" or \"-name\"")]
    InvalidFormat(String),

    /// The token's permission name is not in the defined set.
    #[error("unknown permission {0:?}")]
    UnknownPermission(String),
}
