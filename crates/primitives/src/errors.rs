//! Errors for parsing the bridge primitives.

use thiserror::Error;

/// Error while parsing a primitive from its textual representation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The string does not name a known role.
    #[error("unknown role: {0}")]
    UnknownRole(String),
}
