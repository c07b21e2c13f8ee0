// SPDX-License-Identifier: BUSL-1.1
//! # Identity Records and the Verification Ledger
//!
//! [`IdentityRecord`] holds a party's three encrypted attributes —
//! presence in the record store IS the initialization flag, so a
//! half-initialized record is unrepresentable. [`VerificationStatus`] is
//! the plaintext ledger of verification outcomes; it exposes which
//! attributes passed oracle verification and when, never the attribute
//! values themselves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cid_core::AttributeKind;
use cid_fhe::CiphertextHandle;

/// A party's registered encrypted identity attributes.
///
/// Created once at registration with all three handles set together;
/// immutable afterwards. There is no update or revocation operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Encrypted age in years.
    pub encrypted_age: CiphertextHandle,
    /// Encrypted credit score.
    pub encrypted_credit: CiphertextHandle,
    /// Encrypted nationality code.
    pub encrypted_nationality: CiphertextHandle,
    /// When the record was registered.
    pub registered_at: DateTime<Utc>,
}

impl IdentityRecord {
    /// The stored handle for the given attribute kind.
    pub fn handle_for(&self, kind: AttributeKind) -> CiphertextHandle {
        match kind {
            AttributeKind::Age => self.encrypted_age,
            AttributeKind::CreditScore => self.encrypted_credit,
            AttributeKind::Nationality => self.encrypted_nationality,
        }
    }
}

/// Plaintext verification outcomes for one party.
///
/// Flags start false and are only ever set true by the callback path.
/// Re-verification re-sets the flag and refreshes `verified_at`; no
/// operation reverts a flag to false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationStatus {
    /// Whether the age attribute has been oracle-verified.
    pub age_verified: bool,
    /// Whether the credit-score attribute has been oracle-verified.
    pub credit_verified: bool,
    /// Whether the nationality attribute has been oracle-verified.
    pub nationality_verified: bool,
    /// When the most recent verification landed, if any.
    pub verified_at: Option<DateTime<Utc>>,
}

impl VerificationStatus {
    /// Whether the given attribute has been verified.
    pub fn is_verified(&self, kind: AttributeKind) -> bool {
        match kind {
            AttributeKind::Age => self.age_verified,
            AttributeKind::CreditScore => self.credit_verified,
            AttributeKind::Nationality => self.nationality_verified,
        }
    }

    /// Record a confirmed verification for the given attribute.
    pub(crate) fn record_verified(&mut self, kind: AttributeKind, at: DateTime<Utc>) {
        match kind {
            AttributeKind::Age => self.age_verified = true,
            AttributeKind::CreditScore => self.credit_verified = true,
            AttributeKind::Nationality => self.nationality_verified = true,
        }
        self.verified_at = Some(at);
    }
}
