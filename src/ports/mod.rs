//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ClaimsDecoder` - Logout token to claim set (verify-or-not seam)
//! - `MembershipBackend` - Shared revoked-key membership structure

mod claims_decoder;
mod membership_backend;

pub use claims_decoder::ClaimsDecoder;
pub use membership_backend::{BackendError, MembershipBackend};
