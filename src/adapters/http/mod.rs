//! HTTP adapters - REST API implementations.

pub mod revocation;

use std::time::Duration;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use revocation::{revocation_routes, RevocationAppState};

/// Builds the complete service router with request tracing and a per-request
/// timeout applied to every route.
pub fn build_router(state: RevocationAppState, request_timeout: Duration) -> Router {
    revocation_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(state)
}
