// SPDX-License-Identifier: BUSL-1.1
//! # Encrypted Aggregate Counters
//!
//! Registry-wide tallies of confirmed verifications per attribute kind,
//! kept as ciphertext handles and advanced by homomorphic addition of an
//! encrypted one. The registry never decrypts them; reading the counters
//! yields handles, and plaintext recovery is a separate oracle flow
//! outside this crate.

use serde::{Deserialize, Serialize};

use cid_core::AttributeKind;
use cid_fhe::{CiphertextHandle, FheEngine, FheError};

/// The three encrypted verification counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedCounters {
    /// Confirmed age verifications.
    pub age: CiphertextHandle,
    /// Confirmed credit-score verifications.
    pub credit: CiphertextHandle,
    /// Confirmed nationality verifications.
    pub nationality: CiphertextHandle,
}

impl EncryptedCounters {
    /// Seed all three counters from an encrypted zero.
    pub fn seed(engine: &dyn FheEngine) -> Result<Self, FheError> {
        Ok(Self {
            age: engine.encode_constant(0)?,
            credit: engine.encode_constant(0)?,
            nationality: engine.encode_constant(0)?,
        })
    }

    /// The current handle for the given attribute's counter.
    pub fn handle_for(&self, kind: AttributeKind) -> CiphertextHandle {
        match kind {
            AttributeKind::Age => self.age,
            AttributeKind::CreditScore => self.credit,
            AttributeKind::Nationality => self.nationality,
        }
    }

    /// Replace the handle for the given attribute's counter.
    pub(crate) fn set_handle(&mut self, kind: AttributeKind, handle: CiphertextHandle) {
        match kind {
            AttributeKind::Age => self.age = handle,
            AttributeKind::CreditScore => self.credit = handle,
            AttributeKind::Nationality => self.nationality = handle,
        }
    }
}
