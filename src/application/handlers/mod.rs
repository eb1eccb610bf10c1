//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod revocation;

pub use revocation::{
    CheckRevocationHandler, CheckRevocationQuery, CheckRevocationResult, RevocationError,
    RevokeTokenCommand, RevokeTokenHandler, RevokeTokenResult,
};
