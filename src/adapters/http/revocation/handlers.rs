//! HTTP handlers for revocation endpoints.
//!
//! These handlers connect Axum routes to the revocation command/query handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::application::handlers::revocation::{
    CheckRevocationHandler, CheckRevocationQuery, RevocationError, RevokeTokenCommand,
    RevokeTokenHandler,
};
use crate::config::TokenConfig;
use crate::ports::{ClaimsDecoder, MembershipBackend};

use super::dto::{ErrorResponse, HealthResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned for each request. The backend handle is created once at startup
/// and shared by every request through the `Arc`.
#[derive(Clone)]
pub struct RevocationAppState {
    pub decoder: Arc<dyn ClaimsDecoder>,
    pub backend: Arc<dyn MembershipBackend>,
    pub token: TokenConfig,
}

impl RevocationAppState {
    pub fn new(
        decoder: Arc<dyn ClaimsDecoder>,
        backend: Arc<dyn MembershipBackend>,
        token: TokenConfig,
    ) -> Self {
        Self {
            decoder,
            backend,
            token,
        }
    }

    pub fn revoke_token_handler(&self) -> RevokeTokenHandler {
        RevokeTokenHandler::new(
            self.decoder.clone(),
            self.backend.clone(),
            self.token.claim.clone(),
        )
    }

    pub fn check_revocation_handler(&self) -> CheckRevocationHandler {
        CheckRevocationHandler::new(self.backend.clone(), self.token.claim.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /add - Record the subject of a back-channel logout token as revoked
pub async fn add_revocation(
    State(state): State<RevocationAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AddRevocationError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let cmd = RevokeTokenCommand {
        body: body.to_vec(),
        encoding: state.token.body_format.resolve(content_type),
    };

    state.revoke_token_handler().handle(cmd).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /check/:token_id - Check whether a token identifier is revoked
pub async fn check_revocation(
    State(state): State<RevocationAppState>,
    Path(token_id): Path<String>,
) -> Result<impl IntoResponse, CheckRevocationError> {
    let result = state
        .check_revocation_handler()
        .handle(CheckRevocationQuery { token_id })
        .await?;

    Ok(Json(result.revoked))
}

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::ok())
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Add-path failure. Always a server error naming the failing stage.
#[derive(Debug)]
pub struct AddRevocationError(pub RevocationError);

impl From<RevocationError> for AddRevocationError {
    fn from(err: RevocationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AddRevocationError {
    fn into_response(self) -> axum::response::Response {
        let error_code = match &self.0 {
            RevocationError::Decode(e) => e.code(),
            RevocationError::Backend(_) => "BACKEND_UNAVAILABLE",
        };
        let stage = self.0.stage();
        let message = format!("{stage} stage failed: {}", self.0);
        let body = ErrorResponse::new(error_code, stage, message);
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Check-path failure. A client error with no body, so the gateway never
/// mistakes it for a boolean answer.
#[derive(Debug)]
pub struct CheckRevocationError(pub RevocationError);

impl From<RevocationError> for CheckRevocationError {
    fn from(err: RevocationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CheckRevocationError {
    fn into_response(self) -> axum::response::Response {
        StatusCode::BAD_REQUEST.into_response()
    }
}
