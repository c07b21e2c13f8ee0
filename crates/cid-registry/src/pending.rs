// SPDX-License-Identifier: BUSL-1.1
//! # Pending-Request Correlation
//!
//! One outstanding oracle request, keyed in the registry by the
//! oracle-issued request id. Entries are single-use: the matching
//! callback consumes the entry, and nothing ever re-inserts a consumed
//! id. A party may hold several entries at once — one per in-flight
//! request — each answerable independently.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cid_core::{AttributeKind, PartyAddr};

/// Correlation state for one outstanding decryption request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRequest {
    /// The party whose attribute is being verified.
    pub party: PartyAddr,
    /// The attribute kind under verification.
    pub attribute: AttributeKind,
    /// When the request was submitted to the oracle.
    pub requested_at: DateTime<Utc>,
}
