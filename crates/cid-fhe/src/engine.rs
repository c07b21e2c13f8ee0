//! # Homomorphic Operation Trait
//!
//! Abstracts the homomorphic-encryption service behind a trait, enabling
//! multiple backends:
//!
//! - [`ClearBackedEngine`](crate::ClearBackedEngine): in-memory
//!   simulation for development and testing.
//! - A production backend would delegate to a real FHE coprocessor; the
//!   registry is generic over this trait and never notices the swap.
//!
//! ## Security Invariants
//!
//! - No decryption method exists on this trait. Plaintext recovery is
//!   only reachable through the oracle protocol in `cid-oracle`.
//! - Every operation returns a *fresh* handle; operands remain valid and
//!   unmodified, so callers can reuse a stored handle indefinitely.

use crate::error::FheError;
use crate::handle::{CipherBool, CiphertextHandle};

/// Trait for homomorphic-encryption backends.
///
/// Implementations must be `Send + Sync`; the registry shares one engine
/// across every operation for the life of the process.
pub trait FheEngine: Send + Sync {
    /// Encode a plaintext constant as a fresh ciphertext handle.
    fn encode_constant(&self, value: u64) -> Result<CiphertextHandle, FheError>;

    /// Homomorphic `lhs >= rhs` over encrypted integers.
    fn compare_ge(
        &self,
        lhs: &CiphertextHandle,
        rhs: &CiphertextHandle,
    ) -> Result<CipherBool, FheError>;

    /// Homomorphic conjunction over encrypted booleans.
    fn and(&self, lhs: &CipherBool, rhs: &CipherBool) -> Result<CipherBool, FheError>;

    /// Homomorphic addition over encrypted integers.
    fn add(
        &self,
        lhs: &CiphertextHandle,
        rhs: &CiphertextHandle,
    ) -> Result<CiphertextHandle, FheError>;

    /// Human-readable name for this backend (for diagnostics/logging).
    fn engine_name(&self) -> &str;
}
