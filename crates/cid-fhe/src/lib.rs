//! # cid-fhe — Opaque Homomorphic-Encryption Surface
//!
//! This crate defines the boundary between the verification registry and
//! the homomorphic-encryption service:
//!
//! - **Handle capabilities** ([`handle`]): [`CiphertextHandle`] and
//!   [`CipherBool`] are opaque references to encrypted values. No code
//!   holding a handle can read the plaintext — the only operations are
//!   the homomorphic primitives on [`FheEngine`].
//! - **Operation trait** ([`engine`]): [`FheEngine`] exposes constant
//!   encoding, ≥ comparison, boolean conjunction, and addition. All four
//!   return fresh handles; inputs are never consumed or mutated.
//! - **Simulation backend** ([`clear`]): [`ClearBackedEngine`] keeps a
//!   handle → plaintext table in process memory so the full protocol can
//!   run without a real FHE stack. Its `reveal` trapdoor exists for the
//!   decryption oracle and test assertions only and is deliberately NOT
//!   part of [`FheEngine`].
//!
//! ## Security Invariant
//!
//! Decryption is not expressible through this crate's public operation
//! trait. A component generic over `FheEngine` cannot learn plaintexts,
//! no matter which backend is plugged in.

pub mod clear;
pub mod engine;
pub mod error;
pub mod handle;

// Re-export primary types.
pub use clear::ClearBackedEngine;
pub use engine::FheEngine;
pub use error::FheError;
pub use handle::{CipherBool, CiphertextHandle};
