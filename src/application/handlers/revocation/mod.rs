//! Revocation handlers.
//!
//! ## Commands
//! - Revoking the subject of a back-channel logout token
//!
//! ## Queries
//! - Checking whether a token identifier has been revoked

mod check_revocation;
mod errors;
mod revoke_token;

pub use errors::RevocationError;

// Commands
pub use revoke_token::{RevokeTokenCommand, RevokeTokenHandler, RevokeTokenResult};

// Queries
pub use check_revocation::{CheckRevocationHandler, CheckRevocationQuery, CheckRevocationResult};
