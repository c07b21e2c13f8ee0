// SPDX-License-Identifier: BUSL-1.1
//! # Identity Verification Registry
//!
//! In-memory verification registry backed by `DashMap`. Manages identity
//! registration, oracle-mediated attribute verification, and the
//! encrypted aggregate counters.
//!
//! Execution follows a serialized-transaction discipline: each mutating
//! operation validates first and commits its full effect under the
//! relevant entry lock, so no caller ever observes partial state. The
//! callback path orders its work so every fallible step — pending
//! lookup, proof verification, homomorphic increment — completes before
//! the first visible mutation.

use std::sync::Arc;

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::{info, warn};

use cid_core::{AttributeKind, PartyAddr, RequestId};
use cid_fhe::{CipherBool, CiphertextHandle, FheEngine};
use cid_oracle::{AttestationProof, AttestationVerifier, DecryptionOracle};

use crate::counters::EncryptedCounters;
use crate::error::RegistryError;
use crate::event::RegistryEvent;
use crate::pending::PendingRequest;
use crate::record::{IdentityRecord, VerificationStatus};

/// The verification registry.
///
/// Owns all protocol state — records, ledger, pending correlations,
/// encrypted counters, event log — and the handles to the three external
/// services it is generic over: the homomorphic engine, the decryption
/// oracle, and the attestation verifier.
pub struct IdentityRegistry {
    engine: Arc<dyn FheEngine>,
    oracle: Arc<dyn DecryptionOracle>,
    verifier: Arc<dyn AttestationVerifier>,
    records: DashMap<PartyAddr, IdentityRecord>,
    statuses: DashMap<PartyAddr, VerificationStatus>,
    pending: DashMap<RequestId, PendingRequest>,
    counters: RwLock<EncryptedCounters>,
    events: RwLock<Vec<RegistryEvent>>,
}

impl IdentityRegistry {
    /// Create a registry over the given services.
    ///
    /// Seeds the aggregate counters from an encrypted zero.
    pub fn new(
        engine: Arc<dyn FheEngine>,
        oracle: Arc<dyn DecryptionOracle>,
        verifier: Arc<dyn AttestationVerifier>,
    ) -> Result<Self, RegistryError> {
        let counters = EncryptedCounters::seed(engine.as_ref())?;
        Ok(Self {
            engine,
            oracle,
            verifier,
            records: DashMap::new(),
            statuses: DashMap::new(),
            pending: DashMap::new(),
            counters: RwLock::new(counters),
            events: RwLock::new(Vec::new()),
        })
    }

    // ── Registration ─────────────────────────────────────────────────

    /// Register a party's encrypted identity attributes.
    ///
    /// All three handles are stored together under the record entry
    /// lock; a second registration for the same party fails with
    /// [`RegistryError::AlreadyRegistered`] and leaves the stored
    /// handles untouched.
    pub fn register(
        &self,
        party: PartyAddr,
        encrypted_age: CiphertextHandle,
        encrypted_credit: CiphertextHandle,
        encrypted_nationality: CiphertextHandle,
    ) -> Result<IdentityRecord, RegistryError> {
        let record = match self.records.entry(party.clone()) {
            Entry::Occupied(_) => {
                return Err(RegistryError::AlreadyRegistered { party });
            }
            Entry::Vacant(slot) => {
                let record = IdentityRecord {
                    encrypted_age,
                    encrypted_credit,
                    encrypted_nationality,
                    registered_at: Utc::now(),
                };
                slot.insert(record.clone());
                record
            }
        };

        self.statuses
            .insert(party.clone(), VerificationStatus::default());
        self.push_event(RegistryEvent::IdentityRegistered {
            party: party.clone(),
            at: record.registered_at,
        });
        info!(party = %party, "identity registered");
        Ok(record)
    }

    /// Whether the party holds an initialized identity record.
    pub fn exists(&self, party: &PartyAddr) -> bool {
        self.records.contains_key(party)
    }

    // ── Verification request ─────────────────────────────────────────

    /// Request oracle verification of one attribute.
    ///
    /// Submits the stored ciphertext handle to the decryption oracle and
    /// records the returned id in the pending table. Returns immediately;
    /// the result arrives later through
    /// [`handle_verification_callback`](Self::handle_verification_callback).
    ///
    /// Several requests may be outstanding for the same party and
    /// attribute at once; each is answerable independently by its own
    /// callback.
    pub fn request_verification(
        &self,
        party: &PartyAddr,
        attribute: AttributeKind,
    ) -> Result<RequestId, RegistryError> {
        let handle = self
            .records
            .get(party)
            .map(|r| r.value().handle_for(attribute))
            .ok_or_else(|| RegistryError::IdentityNotFound {
                party: party.clone(),
            })?;

        let request_id = self.oracle.request_decryption(&[handle])?;
        let requested_at = Utc::now();
        self.pending.insert(
            request_id,
            PendingRequest {
                party: party.clone(),
                attribute,
                requested_at,
            },
        );
        self.push_event(RegistryEvent::VerificationRequested {
            party: party.clone(),
            attribute,
            request_id,
            at: requested_at,
        });
        info!(party = %party, attribute = %attribute, request = %request_id, "verification requested");
        Ok(request_id)
    }

    // ── Oracle callback ──────────────────────────────────────────────

    /// Accept an oracle attestation for an outstanding request.
    ///
    /// Public entry point for the oracle's relayer — any caller may
    /// invoke it, and the attestation proof is the only basis for
    /// acceptance. On success the pending entry is consumed, the
    /// party's ledger flag is set, and the matching encrypted counter
    /// is homomorphically incremented by one — all of it, or none:
    ///
    /// - absent request id (forged, consumed, or double-delivered) →
    ///   [`RegistryError::UnknownOrReplayedRequest`], nothing changes;
    /// - failed proof check → [`RegistryError::InvalidProof`], nothing
    ///   changes and the entry STAYS pending, so a corrected proof may
    ///   be resubmitted for the same id.
    pub fn handle_verification_callback(
        &self,
        request_id: RequestId,
        cleartext: u64,
        proof: &AttestationProof,
    ) -> Result<VerificationStatus, RegistryError> {
        let pending = self
            .pending
            .get(&request_id)
            .map(|entry| entry.value().clone())
            .ok_or(RegistryError::UnknownOrReplayedRequest { request_id })?;

        if self
            .verifier
            .check_signatures(&request_id, cleartext, proof)
            .is_err()
        {
            warn!(request = %request_id, "attestation proof rejected");
            return Err(RegistryError::InvalidProof { request_id });
        }

        // Proof accepted. Compute the incremented counter before the
        // first visible mutation so an engine fault cannot strand the
        // ledger half-updated.
        let mut counters = self.counters.write();
        let one = self.engine.encode_constant(1)?;
        let current = counters.handle_for(pending.attribute);
        let incremented = self.engine.add(&current, &one)?;

        // Single linearization point for replay protection.
        if self.pending.remove(&request_id).is_none() {
            return Err(RegistryError::UnknownOrReplayedRequest { request_id });
        }

        let verified_at = Utc::now();
        let status = {
            let mut status = self
                .statuses
                .entry(pending.party.clone())
                .or_insert_with(VerificationStatus::default);
            status.record_verified(pending.attribute, verified_at);
            status.clone()
        };
        counters.set_handle(pending.attribute, incremented);
        drop(counters);

        self.push_event(RegistryEvent::AttributeVerified {
            party: pending.party.clone(),
            attribute: pending.attribute,
            at: verified_at,
        });
        info!(party = %pending.party, attribute = %pending.attribute, request = %request_id, "attribute verified");
        Ok(status)
    }

    // ── Encrypted comparison ─────────────────────────────────────────

    /// Homomorphic eligibility check over a party's stored attributes.
    ///
    /// Returns the encrypted conjunction of `stored_age >= required_age`
    /// and `stored_credit >= required_credit`. The caller receives a
    /// ciphertext boolean; disclosure of its plaintext is a separate
    /// oracle flow, structurally identical to attribute verification.
    pub fn compute_eligibility(
        &self,
        party: &PartyAddr,
        required_age: &CiphertextHandle,
        required_credit: &CiphertextHandle,
    ) -> Result<CipherBool, RegistryError> {
        let (age, credit) = self
            .records
            .get(party)
            .map(|r| (r.value().encrypted_age, r.value().encrypted_credit))
            .ok_or_else(|| RegistryError::IdentityNotFound {
                party: party.clone(),
            })?;

        let age_ok = self.engine.compare_ge(&age, required_age)?;
        let credit_ok = self.engine.compare_ge(&credit, required_credit)?;
        Ok(self.engine.and(&age_ok, &credit_ok)?)
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// The party's verification ledger entry, if registered.
    pub fn verification_status(&self, party: &PartyAddr) -> Option<VerificationStatus> {
        self.statuses.get(party).map(|s| s.value().clone())
    }

    /// The current encrypted aggregate counters.
    ///
    /// Yields ciphertext handles; the registry holds no path to their
    /// plaintext values.
    pub fn encrypted_counters(&self) -> EncryptedCounters {
        *self.counters.read()
    }

    /// Number of requests currently awaiting a callback.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Snapshot of the committed event log, in commit order.
    pub fn events(&self) -> Vec<RegistryEvent> {
        self.events.read().clone()
    }

    fn push_event(&self, event: RegistryEvent) {
        self.events.write().push(event);
    }
}

impl std::fmt::Debug for IdentityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityRegistry")
            .field("engine", &self.engine.engine_name())
            .field("oracle", &self.oracle.oracle_name())
            .field("verifier", &self.verifier.verifier_name())
            .field("records", &self.records.len())
            .field("pending", &self.pending.len())
            .finish()
    }
}
