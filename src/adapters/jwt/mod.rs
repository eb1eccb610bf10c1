//! JWT adapters.
//!
//! Implementations of the `ClaimsDecoder` port:
//!
//! - `unverified` - Claim-set parsing without signature verification

mod unverified;

pub use unverified::UnverifiedClaimsDecoder;
