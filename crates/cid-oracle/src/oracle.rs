//! # Decryption Oracle
//!
//! The request half of the two-message decryption protocol, plus the
//! in-process simulation used by the test harness.
//!
//! [`DecryptionOracle::request_decryption`] never blocks on the result:
//! it returns a fresh request id and the answer arrives later through
//! the registry's callback entry point, carried by whoever relays for
//! the oracle.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use parking_lot::RwLock;
use rand_core::OsRng;

use cid_core::RequestId;
use cid_fhe::{CiphertextHandle, ClearBackedEngine};

use crate::attestation::{attestation_signing_digest, AttestationProof};
use crate::error::OracleError;

/// Trait for decryption-request submission.
///
/// Implementations must be `Send + Sync`. Request-id uniqueness is the
/// oracle's guarantee, not the caller's.
pub trait DecryptionOracle: Send + Sync {
    /// Submit ciphertext handles for off-process decryption.
    ///
    /// Returns the fresh, globally-unique id under which the answer
    /// will later be delivered.
    fn request_decryption(
        &self,
        handles: &[CiphertextHandle],
    ) -> Result<RequestId, OracleError>;

    /// Human-readable name for this oracle (for diagnostics/logging).
    fn oracle_name(&self) -> &str;
}

/// In-process oracle simulation.
///
/// Accepts requests like the real service, but holds them in a queue
/// until the test harness calls [`deliver`](SimulatedOracle::deliver) —
/// making the asynchronous gap between request and callback an explicit,
/// controllable step. Decryption goes through the clear-backed engine's
/// trapdoor; attestations are signed with an in-memory Ed25519 key
/// generated from the OS CSPRNG.
pub struct SimulatedOracle {
    engine: Arc<ClearBackedEngine>,
    signing_key: SigningKey,
    queue: RwLock<HashMap<RequestId, Vec<CiphertextHandle>>>,
}

impl SimulatedOracle {
    /// Create an oracle over the given engine with a fresh signing key.
    pub fn new(engine: Arc<ClearBackedEngine>) -> Self {
        Self {
            engine,
            signing_key: SigningKey::generate(&mut OsRng),
            queue: RwLock::new(HashMap::new()),
        }
    }

    /// The oracle's attestation public key. Pin this into an
    /// [`Ed25519AttestationVerifier`](crate::Ed25519AttestationVerifier).
    pub fn attestation_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Number of requests awaiting delivery.
    pub fn outstanding(&self) -> usize {
        self.queue.read().len()
    }

    /// Decrypt a queued request and produce its signed attestation.
    ///
    /// Consumes the queue entry. The caller is responsible for feeding
    /// the returned `(cleartext, proof)` into the registry callback —
    /// tests exercise out-of-order and never-delivered cases by simply
    /// choosing when (or whether) to do so.
    pub fn deliver(&self, request_id: &RequestId) -> Result<(u64, AttestationProof), OracleError> {
        let handles = self
            .queue
            .write()
            .remove(request_id)
            .ok_or_else(|| OracleError::UnknownRequest(request_id.to_string()))?;

        // Single-attribute requests carry exactly one handle.
        let cleartext = self.engine.reveal(&handles[0])?;

        let digest = attestation_signing_digest(request_id, cleartext);
        let signature = self.signing_key.sign(&digest);
        let proof = AttestationProof::from_signature_bytes(&signature.to_bytes(), Utc::now());
        Ok((cleartext, proof))
    }
}

impl std::fmt::Debug for SimulatedOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedOracle")
            .field("outstanding", &self.queue.read().len())
            .finish()
    }
}

impl DecryptionOracle for SimulatedOracle {
    fn request_decryption(
        &self,
        handles: &[CiphertextHandle],
    ) -> Result<RequestId, OracleError> {
        if handles.is_empty() {
            return Err(OracleError::EmptyRequest);
        }
        let id = RequestId::new();
        self.queue.write().insert(id, handles.to_vec());
        Ok(id)
    }

    fn oracle_name(&self) -> &str {
        "SimulatedOracle"
    }
}
