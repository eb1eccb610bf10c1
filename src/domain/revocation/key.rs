//! Revocation key value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Default claim used as the subject identifier of a logout token.
pub const DEFAULT_CLAIM: &str = "sid";

/// Rejected claim name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid claim name '{0}': must be non-empty and contain no whitespace")]
pub struct InvalidClaimName(pub String);

/// Name of the token claim whose value identifies the revoked subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClaimName(String);

impl ClaimName {
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidClaimName> {
        let name = name.into();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(InvalidClaimName(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ClaimName {
    fn default() -> Self {
        Self(DEFAULT_CLAIM.to_string())
    }
}

impl TryFrom<String> for ClaimName {
    type Error = InvalidClaimName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClaimName> for String {
    fn from(name: ClaimName) -> Self {
        name.0
    }
}

impl fmt::Display for ClaimName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The identity the membership backend stores: `<claimName>-<claimValue>`.
///
/// Both the add path and the check path derive keys through
/// [`RevocationKey::derive`], so equal inputs always meet on the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RevocationKey(String);

impl RevocationKey {
    pub fn derive(claim: &ClaimName, value: &str) -> Self {
        Self(format!("{}-{}", claim.as_str(), value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for RevocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
