//! # FHE Error Types
//!
//! Structured errors for homomorphic-engine operations.

use thiserror::Error;

/// Errors from homomorphic-engine operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FheError {
    /// A handle was presented that this engine never issued.
    #[error("unknown ciphertext handle: {0}")]
    UnknownHandle(String),

    /// Homomorphic addition overflowed the plaintext domain.
    #[error("homomorphic addition overflowed the plaintext domain")]
    Overflow,
}
