//! Axum router configuration for revocation endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{add_revocation, check_revocation, health, RevocationAppState};

/// Create the revocation API router.
///
/// # Routes
///
/// - `POST /add` - Back-channel logout notification (form or JSON body)
/// - `GET /check/:token_id` - Revocation check for the API gateway
/// - `GET /health` - Liveness probe
///
/// No authentication is applied; callers are trusted internal services.
pub fn revocation_routes() -> Router<RevocationAppState> {
    Router::new()
        .route("/add", post(add_revocation))
        .route("/check/:token_id", get(check_revocation))
        .route("/health", get(health))
}
