//! # Attestation Payloads and Proofs
//!
//! An attestation binds a decrypted cleartext to the request id it
//! answers. The oracle signs the SHA-256 digest of the canonical binding
//! encoding; the registry accepts the cleartext only after that
//! signature verifies.
//!
//! ## Security Invariant
//!
//! The signed bytes cover `(request_id, cleartext)` and nothing else.
//! A proof lifted from one request cannot be replayed under another id,
//! and a tampered cleartext invalidates the signature.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use cid_core::RequestId;

/// Canonical signing binding: fixed field order gives a deterministic
/// byte encoding under `serde_json`.
#[derive(Serialize)]
struct AttestationBinding<'a> {
    request_id: &'a RequestId,
    cleartext: u64,
}

/// SHA-256 digest of the canonical `(request_id, cleartext)` binding.
///
/// Both the oracle (signing) and the verifier (checking) compute the
/// digest through this one function, so the two sides cannot drift.
pub fn attestation_signing_digest(request_id: &RequestId, cleartext: u64) -> [u8; 32] {
    let binding = AttestationBinding {
        request_id,
        cleartext,
    };
    let bytes = serde_json::to_vec(&binding).expect("binding struct always serializes");
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    hasher.finalize().into()
}

/// A cryptographic proof over an oracle attestation.
///
/// Carries the hex-encoded Ed25519 signature (64 bytes → 128 hex chars)
/// over [`attestation_signing_digest`], plus the signing timestamp.
/// The timestamp is diagnostic metadata and is not covered by the
/// signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationProof {
    /// Hex-encoded Ed25519 signature bytes.
    #[serde(rename = "proofValue")]
    pub proof_value: String,

    /// When the oracle produced this attestation.
    #[serde(rename = "signedAt")]
    pub signed_at: DateTime<Utc>,
}

impl AttestationProof {
    /// Construct a proof from raw signature bytes.
    pub fn from_signature_bytes(signature: &[u8; 64], signed_at: DateTime<Utc>) -> Self {
        Self {
            proof_value: encode_hex(signature),
            signed_at,
        }
    }
}

/// Encode bytes as lowercase hex.
pub(crate) fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decode a lowercase/uppercase hex string into bytes.
///
/// Returns `None` on odd length or non-hex characters.
pub(crate) fn decode_hex(s: &str) -> Option<Vec<u8>> {
    if !s.is_ascii() || s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_stable_for_same_inputs() {
        let id = RequestId::new();
        assert_eq!(
            attestation_signing_digest(&id, 42),
            attestation_signing_digest(&id, 42)
        );
    }

    #[test]
    fn digest_differs_per_request_id() {
        let a = RequestId::new();
        let b = RequestId::new();
        assert_ne!(
            attestation_signing_digest(&a, 42),
            attestation_signing_digest(&b, 42)
        );
    }

    #[test]
    fn digest_differs_per_cleartext() {
        let id = RequestId::new();
        assert_ne!(
            attestation_signing_digest(&id, 42),
            attestation_signing_digest(&id, 43)
        );
    }

    #[test]
    fn proof_value_is_128_hex_chars() {
        let proof = AttestationProof::from_signature_bytes(&[0xAB; 64], Utc::now());
        assert_eq!(proof.proof_value.len(), 128);
        assert_eq!(proof.proof_value, "ab".repeat(64));
    }

    #[test]
    fn proof_json_field_names() {
        let proof = AttestationProof::from_signature_bytes(&[0; 64], Utc::now());
        let val = serde_json::to_value(&proof).unwrap();
        assert!(val.get("proofValue").is_some());
        assert!(val.get("signedAt").is_some());
        // Must NOT have snake_case versions
        assert!(val.get("proof_value").is_none());
        assert!(val.get("signed_at").is_none());
    }

    #[test]
    fn proof_serde_roundtrip() {
        let proof = AttestationProof::from_signature_bytes(&[0x5A; 64], Utc::now());
        let json = serde_json::to_string(&proof).unwrap();
        let back: AttestationProof = serde_json::from_str(&json).unwrap();
        assert_eq!(back, proof);
    }

    #[test]
    fn hex_roundtrip() {
        let bytes = [0u8, 1, 0x7f, 0xff];
        let hex = encode_hex(&bytes);
        assert_eq!(hex, "00017fff");
        assert_eq!(decode_hex(&hex).unwrap(), bytes);
    }

    #[test]
    fn hex_decode_rejects_bad_input() {
        assert!(decode_hex("abc").is_none()); // odd length
        assert!(decode_hex("zz").is_none()); // non-hex
        assert!(decode_hex("αβ").is_none()); // non-ascii
        assert_eq!(decode_hex("").unwrap(), Vec::<u8>::new());
    }
}
