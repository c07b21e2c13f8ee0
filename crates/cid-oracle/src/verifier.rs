//! # Attestation Verification
//!
//! Abstracts the attestation-signature check behind a trait so the
//! registry can be tested against accepting, rejecting, and misbehaving
//! verifiers without touching key material.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};

use cid_core::RequestId;

use crate::attestation::{attestation_signing_digest, decode_hex, AttestationProof};
use crate::error::OracleError;

/// Trait for attestation-verification backends.
///
/// Implementations must be `Send + Sync`; the registry holds one
/// verifier for the life of the process.
pub trait AttestationVerifier: Send + Sync {
    /// Check that `proof` is a valid attestation of `cleartext` for
    /// `request_id` under the oracle's known signing key.
    fn check_signatures(
        &self,
        request_id: &RequestId,
        cleartext: u64,
        proof: &AttestationProof,
    ) -> Result<(), OracleError>;

    /// Human-readable name for this verifier (for diagnostics/logging).
    fn verifier_name(&self) -> &str;
}

/// Ed25519 attestation verifier pinned to one oracle public key.
#[derive(Debug, Clone)]
pub struct Ed25519AttestationVerifier {
    key: VerifyingKey,
}

impl Ed25519AttestationVerifier {
    /// Create a verifier for the given oracle attestation key.
    pub fn new(key: VerifyingKey) -> Self {
        Self { key }
    }

    /// The pinned attestation key.
    pub fn key(&self) -> &VerifyingKey {
        &self.key
    }
}

impl AttestationVerifier for Ed25519AttestationVerifier {
    fn check_signatures(
        &self,
        request_id: &RequestId,
        cleartext: u64,
        proof: &AttestationProof,
    ) -> Result<(), OracleError> {
        let bytes = decode_hex(&proof.proof_value)
            .ok_or_else(|| OracleError::MalformedProof("proof value is not hex".to_string()))?;
        let bytes: [u8; 64] = bytes.try_into().map_err(|v: Vec<u8>| {
            OracleError::MalformedProof(format!(
                "expected 64 signature bytes, got {}",
                v.len()
            ))
        })?;
        let signature = Signature::from_bytes(&bytes);
        let digest = attestation_signing_digest(request_id, cleartext);
        self.key
            .verify(&digest, &signature)
            .map_err(|_| OracleError::SignatureMismatch)
    }

    fn verifier_name(&self) -> &str {
        "Ed25519AttestationVerifier"
    }
}
