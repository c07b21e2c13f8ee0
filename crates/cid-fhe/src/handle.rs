//! # Ciphertext Handle Capabilities
//!
//! Opaque references to encrypted values. A handle is a capability, not
//! a value type: it can be stored, compared for identity, and passed to
//! the homomorphic operations on [`FheEngine`](crate::FheEngine), but it
//! exposes no accessor for the underlying plaintext.
//!
//! Integer-valued and boolean-valued ciphertexts are distinct types, so
//! a comparison result cannot be fed where an integer ciphertext is
//! expected — that mixup is a compile error, not a runtime check.

use serde::{Deserialize, Serialize};

/// Number of bytes in a handle identifier.
pub const HANDLE_LEN: usize = 32;

/// An opaque reference to an encrypted integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CiphertextHandle([u8; HANDLE_LEN]);

impl CiphertextHandle {
    /// Construct a handle from raw identifier bytes.
    ///
    /// Handle identifiers are minted by an engine; constructing one from
    /// arbitrary bytes yields a handle no engine will recognize.
    pub fn from_bytes(bytes: [u8; HANDLE_LEN]) -> Self {
        Self(bytes)
    }

    /// The raw identifier bytes.
    pub fn as_bytes(&self) -> &[u8; HANDLE_LEN] {
        &self.0
    }

    /// Hex encoding of the identifier (64 lowercase hex chars).
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for CiphertextHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Abbreviated form for logs; the full identifier stays internal.
        write!(f, "ct:{}", &self.to_hex()[..8])
    }
}

/// An opaque reference to an encrypted boolean.
///
/// Produced by homomorphic comparison and conjunction. Distinct from
/// [`CiphertextHandle`] so boolean results cannot be used as integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CipherBool([u8; HANDLE_LEN]);

impl CipherBool {
    /// Construct a boolean handle from raw identifier bytes.
    pub fn from_bytes(bytes: [u8; HANDLE_LEN]) -> Self {
        Self(bytes)
    }

    /// The raw identifier bytes.
    pub fn as_bytes(&self) -> &[u8; HANDLE_LEN] {
        &self.0
    }

    /// Hex encoding of the identifier (64 lowercase hex chars).
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for CipherBool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cb:{}", &self.to_hex()[..8])
    }
}
