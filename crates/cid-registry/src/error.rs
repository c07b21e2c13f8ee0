// SPDX-License-Identifier: BUSL-1.1
//! # Registry Error Types
//!
//! The verification protocol's error taxonomy. Every variant is terminal
//! for the call that raised it; no partial state survives a failure path.

use thiserror::Error;

use cid_core::{PartyAddr, RequestId};
use cid_fhe::FheError;
use cid_oracle::OracleError;

/// Errors from verification-registry operations.
///
/// `UnknownOrReplayedRequest` deliberately covers forged ids, consumed
/// ids, and double deliveries in one variant — the registry does not
/// reveal which case an external caller hit.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The party already holds an initialized identity record.
    #[error("party {party} is already registered")]
    AlreadyRegistered {
        /// The registering party.
        party: PartyAddr,
    },

    /// No identity record exists for the party.
    #[error("no identity record for party {party}")]
    IdentityNotFound {
        /// The party that was looked up.
        party: PartyAddr,
    },

    /// The request id matches no live pending entry.
    #[error("request {request_id} is unknown or already processed")]
    UnknownOrReplayedRequest {
        /// The rejected request id.
        request_id: RequestId,
    },

    /// The attestation proof did not validate.
    #[error("attestation proof rejected for request {request_id}")]
    InvalidProof {
        /// The request whose proof was rejected.
        request_id: RequestId,
    },

    /// Homomorphic-engine fault.
    #[error(transparent)]
    Fhe(#[from] FheError),

    /// Oracle request-submission fault.
    #[error(transparent)]
    Oracle(#[from] OracleError),
}
