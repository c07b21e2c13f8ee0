//! # Replay and Forgery Integration Tests
//!
//! Adversarial coverage of the callback entry point: replayed request
//! ids, forged ids, rogue-key attestations, proofs lifted between
//! requests, and the documented retry-after-bad-proof policy.

use std::sync::Arc;

use chrono::Utc;
use ed25519_dalek::{Signer, SigningKey};
use rand_core::OsRng;

use cid_core::{AttributeKind, PartyAddr, RequestId};
use cid_fhe::{ClearBackedEngine, FheEngine};
use cid_oracle::{
    attestation_signing_digest, AttestationProof, DecryptionOracle, Ed25519AttestationVerifier,
    SimulatedOracle,
};
use cid_registry::{IdentityRegistry, RegistryError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Stack {
    engine: Arc<ClearBackedEngine>,
    oracle: Arc<SimulatedOracle>,
    registry: IdentityRegistry,
}

fn stack() -> Stack {
    let engine = Arc::new(ClearBackedEngine::new());
    let oracle = Arc::new(SimulatedOracle::new(Arc::clone(&engine)));
    let verifier = Arc::new(Ed25519AttestationVerifier::new(oracle.attestation_key()));
    let registry = IdentityRegistry::new(
        Arc::clone(&engine) as Arc<dyn FheEngine>,
        Arc::clone(&oracle) as Arc<dyn DecryptionOracle>,
        verifier,
    )
    .unwrap();
    Stack {
        engine,
        oracle,
        registry,
    }
}

fn party(tag: u8) -> PartyAddr {
    PartyAddr::new(format!("0x{}", format!("{tag:02x}").repeat(20))).unwrap()
}

fn registered_party(s: &Stack, tag: u8) -> PartyAddr {
    let p = party(tag);
    s.registry
        .register(
            p.clone(),
            s.engine.encrypt(30),
            s.engine.encrypt(700),
            s.engine.encrypt(586),
        )
        .unwrap();
    p
}

fn age_counter(s: &Stack) -> u64 {
    s.engine
        .reveal(
            &s.registry
                .encrypted_counters()
                .handle_for(AttributeKind::Age),
        )
        .unwrap()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn exact_replay_of_consumed_callback_rejected() {
    let s = stack();
    let p = registered_party(&s, 0x10);
    let id = s
        .registry
        .request_verification(&p, AttributeKind::Age)
        .unwrap();
    let (ct, proof) = s.oracle.deliver(&id).unwrap();

    s.registry
        .handle_verification_callback(id, ct, &proof)
        .unwrap();
    assert_eq!(age_counter(&s), 1);

    // Byte-for-byte identical second delivery.
    let err = s
        .registry
        .handle_verification_callback(id, ct, &proof)
        .unwrap_err();
    assert!(matches!(err, RegistryError::UnknownOrReplayedRequest { .. }));
    assert_eq!(age_counter(&s), 1);
    assert!(s.registry.verification_status(&p).unwrap().age_verified);
}

#[test]
fn never_issued_request_id_rejected() {
    let s = stack();
    registered_party(&s, 0x20);
    let proof = AttestationProof {
        proof_value: "11".repeat(64),
        signed_at: Utc::now(),
    };
    let err = s
        .registry
        .handle_verification_callback(RequestId::new(), 30, &proof)
        .unwrap_err();
    assert!(matches!(err, RegistryError::UnknownOrReplayedRequest { .. }));
    assert_eq!(age_counter(&s), 0);
}

#[test]
fn rogue_oracle_key_cannot_attest() {
    let s = stack();
    let p = registered_party(&s, 0x30);
    let id = s
        .registry
        .request_verification(&p, AttributeKind::Age)
        .unwrap();

    // An attacker who knows the pending id and the true cleartext but
    // signs with their own key.
    let rogue = SigningKey::generate(&mut OsRng);
    let digest = attestation_signing_digest(&id, 30);
    let proof = AttestationProof::from_signature_bytes(&rogue.sign(&digest).to_bytes(), Utc::now());

    let err = s
        .registry
        .handle_verification_callback(id, 30, &proof)
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidProof { .. }));
    assert!(!s.registry.verification_status(&p).unwrap().age_verified);
    assert_eq!(age_counter(&s), 0);
}

#[test]
fn proof_lifted_from_sibling_request_rejected() {
    let s = stack();
    let p = registered_party(&s, 0x40);
    let first = s
        .registry
        .request_verification(&p, AttributeKind::Age)
        .unwrap();
    let second = s
        .registry
        .request_verification(&p, AttributeKind::Age)
        .unwrap();

    // A genuine proof for `first` does not validate under `second`:
    // the signature binds the request id.
    let (ct, proof_for_first) = s.oracle.deliver(&first).unwrap();
    let err = s
        .registry
        .handle_verification_callback(second, ct, &proof_for_first)
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidProof { .. }));

    // Both requests remain answerable by their own attestations.
    s.registry
        .handle_verification_callback(first, ct, &proof_for_first)
        .unwrap();
    let (ct2, proof_for_second) = s.oracle.deliver(&second).unwrap();
    s.registry
        .handle_verification_callback(second, ct2, &proof_for_second)
        .unwrap();
    assert_eq!(age_counter(&s), 2);
}

#[test]
fn bad_proof_then_corrected_proof_retry() {
    let s = stack();
    let p = registered_party(&s, 0x50);
    let id = s
        .registry
        .request_verification(&p, AttributeKind::Age)
        .unwrap();
    let (ct, good_proof) = s.oracle.deliver(&id).unwrap();

    let garbage = AttestationProof {
        proof_value: "ff".repeat(64),
        signed_at: Utc::now(),
    };
    for _ in 0..3 {
        let err = s
            .registry
            .handle_verification_callback(id, ct, &garbage)
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidProof { .. }));
    }
    // Failed proofs never consumed the entry.
    assert_eq!(s.registry.pending_count(), 1);
    assert_eq!(age_counter(&s), 0);

    // The corrected proof still lands, exactly once.
    s.registry
        .handle_verification_callback(id, ct, &good_proof)
        .unwrap();
    assert_eq!(age_counter(&s), 1);
    assert_eq!(s.registry.pending_count(), 0);
}

#[test]
fn malformed_proof_encoding_rejected_without_consuming() {
    let s = stack();
    let p = registered_party(&s, 0x60);
    let id = s
        .registry
        .request_verification(&p, AttributeKind::Age)
        .unwrap();

    for bad in ["", "zz", "ab"] {
        let proof = AttestationProof {
            proof_value: bad.to_string(),
            signed_at: Utc::now(),
        };
        let err = s
            .registry
            .handle_verification_callback(id, 30, &proof)
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidProof { .. }));
    }
    assert_eq!(s.registry.pending_count(), 1);
}

#[test]
fn rejection_kinds_do_not_leak_pending_liveness_details() {
    let s = stack();
    let p = registered_party(&s, 0x70);
    let live = s
        .registry
        .request_verification(&p, AttributeKind::Age)
        .unwrap();
    let (ct, proof) = s.oracle.deliver(&live).unwrap();
    s.registry
        .handle_verification_callback(live, ct, &proof)
        .unwrap();

    // Consumed id and never-issued id produce the same error kind and
    // the same message shape.
    let consumed = s
        .registry
        .handle_verification_callback(live, ct, &proof)
        .unwrap_err();
    let forged = s
        .registry
        .handle_verification_callback(RequestId::new(), ct, &proof)
        .unwrap_err();
    assert!(matches!(
        consumed,
        RegistryError::UnknownOrReplayedRequest { .. }
    ));
    assert!(matches!(
        forged,
        RegistryError::UnknownOrReplayedRequest { .. }
    ));
}
