//! # cid-oracle — Decryption Oracle Seam
//!
//! The verification protocol never decrypts in-process. Plaintext
//! disclosure goes through a two-message protocol with an external
//! oracle:
//!
//! 1. The registry submits ciphertext handles via [`DecryptionOracle`]
//!    and receives a fresh [`RequestId`](cid_core::RequestId).
//! 2. The oracle decrypts off to the side and later returns the
//!    cleartext together with an [`AttestationProof`] — an Ed25519
//!    signature binding the cleartext to the request id.
//!
//! Callback callers are untrusted until the proof checks out; the
//! [`AttestationVerifier`] trait is the registry's only basis for
//! accepting a cleartext.
//!
//! The [`SimulatedOracle`] drives this protocol in-process against the
//! clear-backed engine so integration tests can exercise the full
//! asynchronous flow without external infrastructure.

pub mod attestation;
pub mod error;
pub mod oracle;
pub mod verifier;

// Re-export primary types.
pub use attestation::{attestation_signing_digest, AttestationProof};
pub use error::OracleError;
pub use oracle::{DecryptionOracle, SimulatedOracle};
pub use verifier::{AttestationVerifier, Ed25519AttestationVerifier};
