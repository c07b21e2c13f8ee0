// SPDX-License-Identifier: BUSL-1.1
//! # Registry Events
//!
//! Observable notifications appended to the registry's in-memory log as
//! each mutating operation commits. The log is append-only; events are
//! recorded in commit order under the serialized-execution discipline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cid_core::{AttributeKind, PartyAddr, RequestId};

/// A committed registry state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// A party registered its encrypted identity record.
    IdentityRegistered {
        /// The registering party.
        party: PartyAddr,
        /// Commit time.
        at: DateTime<Utc>,
    },
    /// A verification request was submitted to the oracle.
    VerificationRequested {
        /// The party under verification.
        party: PartyAddr,
        /// The attribute kind requested.
        attribute: AttributeKind,
        /// The oracle-issued correlation id.
        request_id: RequestId,
        /// Commit time.
        at: DateTime<Utc>,
    },
    /// An oracle callback confirmed an attribute verification.
    AttributeVerified {
        /// The verified party.
        party: PartyAddr,
        /// The attribute kind confirmed.
        attribute: AttributeKind,
        /// Commit time.
        at: DateTime<Utc>,
    },
}

impl RegistryEvent {
    /// The party this event concerns.
    pub fn party(&self) -> &PartyAddr {
        match self {
            Self::IdentityRegistered { party, .. }
            | Self::VerificationRequested { party, .. }
            | Self::AttributeVerified { party, .. } => party,
        }
    }
}
