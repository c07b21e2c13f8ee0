//! # Attribute Kinds
//!
//! The closed set of encrypted identity attributes the protocol can
//! verify. The enum is the only representation used inside the registry;
//! untrusted text enters through [`AttributeKind::parse`] and nowhere
//! else, so an invalid kind is rejected at the boundary rather than
//! checked on every operation.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// An encrypted identity attribute subject to oracle verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKind {
    /// The party's age in years.
    Age,
    /// The party's credit score.
    CreditScore,
    /// The party's nationality code.
    Nationality,
}

impl AttributeKind {
    /// All attribute kinds, in canonical order.
    pub const ALL: [AttributeKind; 3] = [Self::Age, Self::CreditScore, Self::Nationality];

    /// The canonical string name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Age => "AGE",
            Self::CreditScore => "CREDIT_SCORE",
            Self::Nationality => "NATIONALITY",
        }
    }

    /// Parse a canonical kind name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAttributeKind`] for any string
    /// that is not one of the canonical names.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "AGE" => Ok(Self::Age),
            "CREDIT_SCORE" => Ok(Self::CreditScore),
            "NATIONALITY" => Ok(Self::Nationality),
            other => Err(ValidationError::InvalidAttributeKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AttributeKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
