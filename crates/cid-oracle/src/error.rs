//! # Oracle Error Types
//!
//! Structured errors for decryption-request submission and attestation
//! verification.

use thiserror::Error;

use cid_fhe::FheError;

/// Errors from oracle interaction and attestation verification.
#[derive(Error, Debug)]
pub enum OracleError {
    /// A decryption request carried no ciphertext handles.
    #[error("decryption request must carry at least one ciphertext handle")]
    EmptyRequest,

    /// The oracle has no outstanding request under this identifier.
    #[error("no outstanding decryption request: {0}")]
    UnknownRequest(String),

    /// The proof value is not a well-formed Ed25519 signature encoding.
    #[error("malformed attestation proof: {0}")]
    MalformedProof(String),

    /// The signature does not verify against the oracle's attestation key.
    #[error("attestation signature verification failed")]
    SignatureMismatch,

    /// Engine fault while the simulated oracle resolved a handle.
    #[error(transparent)]
    Fhe(#[from] FheError),
}
