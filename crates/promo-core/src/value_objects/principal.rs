//! Authenticated principal - the caller identity established once at the boundary
//!
//! Users and companies authenticate through parallel endpoints but share one
//! token format. The kind travels in the token claims and is resolved into
//! this tagged enum by the auth extractor; handlers then require the kind
//! they serve instead of re-checking claims.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Which kind of account a principal is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalKind {
    User,
    Company,
}

impl PrincipalKind {
    /// The lowercase wire form used in token claims and cache keys
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Company => "company",
        }
    }
}

impl fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a principal kind from its wire form
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown principal kind: {0}")]
pub struct PrincipalKindParseError(pub String);

impl FromStr for PrincipalKind {
    type Err = PrincipalKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "company" => Ok(Self::Company),
            other => Err(PrincipalKindParseError(other.to_string())),
        }
    }
}

/// The authenticated caller: a user or a company, never both
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Principal {
    User(Uuid),
    Company(Uuid),
}

impl Principal {
    /// Build a principal from its kind and account id
    #[must_use]
    pub fn new(kind: PrincipalKind, id: Uuid) -> Self {
        match kind {
            PrincipalKind::User => Self::User(id),
            PrincipalKind::Company => Self::Company(id),
        }
    }

    /// The kind tag
    #[inline]
    #[must_use]
    pub fn kind(&self) -> PrincipalKind {
        match self {
            Self::User(_) => PrincipalKind::User,
            Self::Company(_) => PrincipalKind::Company,
        }
    }

    /// The account id regardless of kind
    #[inline]
    #[must_use]
    pub fn id(&self) -> Uuid {
        match self {
            Self::User(id) | Self::Company(id) => *id,
        }
    }

    /// The user id, if this principal is a user
    #[must_use]
    pub fn as_user(&self) -> Option<Uuid> {
        match self {
            Self::User(id) => Some(*id),
            Self::Company(_) => None,
        }
    }

    /// The company id, if this principal is a company
    #[must_use]
    pub fn as_company(&self) -> Option<Uuid> {
        match self {
            Self::Company(id) => Some(*id),
            Self::User(_) => None,
        }
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.id())
    }
}
