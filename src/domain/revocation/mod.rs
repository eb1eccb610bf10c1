//! Revocation domain - logout notifications, claim sets and revocation keys.
//!
//! Everything here is a pure function of its input and configuration; no
//! module in this tree performs I/O.
//!
//! # Pipeline
//!
//! ```text
//! body bytes --LogoutNotification::parse--> logout token
//!            --ClaimsDecoder (port)-------> ClaimSet
//!            --ClaimSet::revocation_key---> RevocationKey ("sid-abc123")
//! ```

mod claims;
mod errors;
mod key;
mod logout;

pub use claims::ClaimSet;
pub use errors::DecodeError;
pub use key::{ClaimName, InvalidClaimName, RevocationKey, DEFAULT_CLAIM};
pub use logout::{BodyEncoding, BodyFormat, LogoutNotification};
