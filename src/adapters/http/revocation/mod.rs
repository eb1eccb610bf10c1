//! HTTP adapter for the revocation endpoints.
//!
//! Exposes the add/check pair consumed by the identity provider and the API
//! gateway, plus a liveness probe.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, HealthResponse};
pub use handlers::{
    add_revocation, check_revocation, health, AddRevocationError, CheckRevocationError,
    RevocationAppState,
};
pub use routes::revocation_routes;
