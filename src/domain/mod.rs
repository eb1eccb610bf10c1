//! Domain layer containing the revocation types.
//!
//! # Module Organization
//!
//! - `revocation` - Logout notifications, claim sets and revocation key derivation

pub mod revocation;
