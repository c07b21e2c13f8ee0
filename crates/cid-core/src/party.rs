//! # Party and Request Identifiers
//!
//! Newtypes for the two identifier spaces of the verification protocol:
//! the registering party's account address and the oracle-issued
//! decryption request identifier.
//!
//! ## Validation
//!
//! [`PartyAddr`] validates format at construction time and stores the
//! canonical lowercase form. [`RequestId`] wraps a UUID and is always
//! valid by construction; fresh ids are minted by the oracle, never by
//! the registry.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Helper macro to implement `Deserialize` for string newtypes that must
/// validate their contents. Deserializes as a plain `String`, then routes
/// through the type's `new()` constructor so that invalid values are
/// rejected at deserialization time — not silently accepted.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// PartyAddr (validated at construction)
// ---------------------------------------------------------------------------

/// Account address of a registering party.
///
/// Format: `0x` followed by exactly 40 hex digits. The constructor
/// accepts mixed case and stores the canonical lowercase form, so two
/// spellings of the same address always compare equal and hash to the
/// same map slot.
///
/// # Validation
///
/// - Must start with `0x`
/// - Exactly 40 hex characters after the prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PartyAddr(String);

impl_validating_deserialize!(PartyAddr);

impl PartyAddr {
    /// Create a party address from a string, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPartyAddr`] if the string does
    /// not match the `0x` + 40 hex digit format.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let Some(body) = raw.strip_prefix("0x") else {
            return Err(ValidationError::InvalidPartyAddr(raw));
        };
        if body.len() != 40 || !body.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidPartyAddr(raw));
        }
        Ok(Self(format!("0x{}", body.to_ascii_lowercase())))
    }

    /// Access the canonical lowercase address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PartyAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PartyAddr {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ---------------------------------------------------------------------------
// RequestId (always valid by construction)
// ---------------------------------------------------------------------------

/// A unique identifier for an outstanding oracle decryption request.
///
/// Minted by the decryption oracle when a request is accepted; global
/// uniqueness is the oracle's guarantee. The registry only correlates —
/// it never fabricates ids of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Mint a new random request identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a request identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RequestId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RequestId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- PartyAddr --

    #[test]
    fn party_addr_valid() {
        let addr = PartyAddr::new(format!("0x{}", "ab".repeat(20))).unwrap();
        assert_eq!(addr.as_str(), &format!("0x{}", "ab".repeat(20)));
    }

    #[test]
    fn party_addr_canonicalizes_case() {
        let upper = PartyAddr::new(format!("0x{}", "AB".repeat(20))).unwrap();
        let lower = PartyAddr::new(format!("0x{}", "ab".repeat(20))).unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.as_str(), lower.as_str());
    }

    #[test]
    fn party_addr_rejects_invalid() {
        assert!(PartyAddr::new("").is_err());
        assert!(PartyAddr::new("ab".repeat(21)).is_err()); // missing 0x
        assert!(PartyAddr::new("0x1234").is_err()); // too short
        assert!(PartyAddr::new(format!("0x{}", "ab".repeat(21))).is_err()); // too long
        assert!(PartyAddr::new(format!("0x{}zz", "ab".repeat(19))).is_err()); // non-hex
    }

    #[test]
    fn party_addr_display_matches_canonical() {
        let addr = PartyAddr::new(format!("0x{}", "C0".repeat(20))).unwrap();
        assert_eq!(format!("{addr}"), format!("0x{}", "c0".repeat(20)));
    }

    #[test]
    fn party_addr_from_str() {
        let s = format!("0x{}", "12".repeat(20));
        let addr: PartyAddr = s.parse().unwrap();
        assert_eq!(addr.as_str(), s);
    }

    #[test]
    fn party_addr_serde_roundtrip() {
        let addr = PartyAddr::new(format!("0x{}", "4f".repeat(20))).unwrap();
        let json_str = serde_json::to_string(&addr).unwrap();
        let deserialized: PartyAddr = serde_json::from_str(&json_str).unwrap();
        assert_eq!(addr, deserialized);
    }

    #[test]
    fn party_addr_deserialize_rejects_invalid() {
        let result: Result<PartyAddr, _> = serde_json::from_str("\"0xnothex\"");
        assert!(result.is_err());
    }

    #[test]
    fn party_addr_in_hashset() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(PartyAddr::new(format!("0x{}", "aa".repeat(20))).unwrap());
        set.insert(PartyAddr::new(format!("0x{}", "AA".repeat(20))).unwrap());
        set.insert(PartyAddr::new(format!("0x{}", "bb".repeat(20))).unwrap());
        assert_eq!(set.len(), 2);
    }

    // -- RequestId --

    #[test]
    fn request_id_unique() {
        let a = RequestId::new();
        let b = RequestId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn request_id_from_uuid_roundtrip() {
        let uuid = Uuid::new_v4();
        let id = RequestId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn request_id_display() {
        let id = RequestId::new();
        let display = format!("{id}");
        // UUID format: 8-4-4-4-12 = 36 chars
        assert_eq!(display.len(), 36);
    }

    #[test]
    fn request_id_serde_roundtrip() {
        let id = RequestId::new();
        let json_str = serde_json::to_string(&id).unwrap();
        let deserialized: RequestId = serde_json::from_str(&json_str).unwrap();
        assert_eq!(id, deserialized);
    }

    // -- Property tests --

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn party_addr_accepts_any_40_hex(body in "[0-9a-fA-F]{40}") {
                let addr = PartyAddr::new(format!("0x{body}")).unwrap();
                prop_assert_eq!(addr.as_str(), &format!("0x{}", body.to_ascii_lowercase()));
            }

            #[test]
            fn party_addr_rejects_wrong_length(body in "[0-9a-f]{0,39}") {
                let candidate = format!("0x{}", body);
                prop_assert!(PartyAddr::new(candidate).is_err());
            }
        }
    }
}
