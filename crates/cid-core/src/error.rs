//! # Validation Error Types
//!
//! Structured errors raised when constructing domain primitives from
//! untrusted input. Uses `thiserror` for ergonomic error definitions.

use thiserror::Error;

/// Errors from domain-primitive validation in the CipherID Stack.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Party address does not match the `0x` + 40 hex digit format.
    #[error("invalid party address: {0}")]
    InvalidPartyAddr(String),

    /// Attribute kind name is not one of the known kinds.
    #[error("invalid attribute kind: {0}")]
    InvalidAttributeKind(String),
}
