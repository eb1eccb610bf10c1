//! Claims decoder port - turns a logout token into its claim set.
//!
//! Decoding is a pluggable capability: the default adapter trusts the
//! channel and skips signature verification, while a verifying adapter can
//! be swapped in without touching key derivation.

use crate::domain::revocation::{ClaimSet, DecodeError};

/// Decodes the claim set of a JWT-structured logout token.
///
/// # Contract
///
/// Implementations must:
/// - Return `DecodeError::InvalidToken` when the token is not a three-part
///   JWT or its header/payload cannot be decoded
/// - Never perform I/O on the request path that can block indefinitely
pub trait ClaimsDecoder: Send + Sync {
    fn decode(&self, token: &str) -> Result<ClaimSet, DecodeError>;
}
