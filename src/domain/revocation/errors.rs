//! Decode errors for the logout-token pipeline.
//!
//! Every variant describes client-supplied input that cannot be turned into a
//! revocation key. None of them is retried; the HTTP layer reports them as-is.

use thiserror::Error;

/// Failure to turn a logout notification into a [`RevocationKey`].
///
/// [`RevocationKey`]: super::RevocationKey
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The request body does not carry a usable `logout_token` value.
    #[error("malformed logout notification body: {0}")]
    MalformedBody(String),

    /// The logout token is not a parseable three-part JWT.
    #[error("invalid logout token: {0}")]
    InvalidToken(String),

    /// The configured claim is absent from the token's claim set.
    #[error("claim '{0}' missing from logout token")]
    ClaimMissing(String),

    /// The configured claim is present but its value is not a string.
    #[error("claim '{claim}' must be a string, found {found}")]
    ClaimTypeMismatch { claim: String, found: &'static str },
}

impl DecodeError {
    pub fn malformed_body(detail: impl Into<String>) -> Self {
        Self::MalformedBody(detail.into())
    }

    pub fn invalid_token(detail: impl Into<String>) -> Self {
        Self::InvalidToken(detail.into())
    }

    pub fn claim_missing(claim: impl Into<String>) -> Self {
        Self::ClaimMissing(claim.into())
    }

    /// Name of the pipeline stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            DecodeError::MalformedBody(_) => "body",
            DecodeError::InvalidToken(_) => "token",
            DecodeError::ClaimMissing(_) | DecodeError::ClaimTypeMismatch { .. } => "claim",
        }
    }

    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            DecodeError::MalformedBody(_) => "MALFORMED_BODY",
            DecodeError::InvalidToken(_) => "INVALID_TOKEN",
            DecodeError::ClaimMissing(_) => "CLAIM_MISSING",
            DecodeError::ClaimTypeMismatch { .. } => "CLAIM_TYPE_MISMATCH",
        }
    }
}
