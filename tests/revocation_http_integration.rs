//! Integration tests for revocation HTTP endpoints.
//!
//! These tests drive the full router (tracing and timeout layers included):
//! 1. Logout notifications are decoded and recorded exactly once
//! 2. Checks answer with a bare JSON boolean
//! 3. Failures map to the documented status codes

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

use jwt_revoker::adapters::http::RevocationAppState;
use jwt_revoker::adapters::{build_router, InMemoryBloomBackend, UnverifiedClaimsDecoder};
use jwt_revoker::config::TokenConfig;
use jwt_revoker::domain::revocation::{BodyFormat, ClaimName, RevocationKey};
use jwt_revoker::ports::{BackendError, MembershipBackend};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Exact-set backend that counts every call.
struct CountingBackend {
    keys: Mutex<HashSet<String>>,
    adds: Mutex<Vec<String>>,
    fail_checks: bool,
}

impl CountingBackend {
    fn new() -> Self {
        Self {
            keys: Mutex::new(HashSet::new()),
            adds: Mutex::new(Vec::new()),
            fail_checks: false,
        }
    }

    fn failing_checks() -> Self {
        Self {
            fail_checks: true,
            ..Self::new()
        }
    }

    fn adds(&self) -> Vec<String> {
        self.adds.lock().unwrap().clone()
    }
}

#[async_trait]
impl MembershipBackend for CountingBackend {
    async fn add(&self, key: &RevocationKey) -> Result<(), BackendError> {
        self.adds.lock().unwrap().push(key.to_string());
        self.keys.lock().unwrap().insert(key.to_string());
        Ok(())
    }

    async fn check(&self, key: &RevocationKey) -> Result<bool, BackendError> {
        if self.fail_checks {
            return Err(BackendError::connection_failed("connection reset"));
        }
        Ok(self.keys.lock().unwrap().contains(key.as_str()))
    }

    async fn close(&self) -> Result<(), BackendError> {
        Ok(())
    }
}

fn app_with(backend: Arc<dyn MembershipBackend>, token: TokenConfig) -> Router {
    let state = RevocationAppState::new(Arc::new(UnverifiedClaimsDecoder::new()), backend, token);
    build_router(state, Duration::from_secs(5))
}

fn app(backend: Arc<dyn MembershipBackend>) -> Router {
    app_with(backend, TokenConfig::default())
}

fn logout_token(claims: Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"identity-provider-secret"),
    )
    .unwrap()
}

fn form_add(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/add")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn json_add(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/add")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn check(id: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/check/{id}"))
        .body(Body::empty())
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

// =============================================================================
// Add Then Check
// =============================================================================

#[tokio::test]
async fn added_sid_is_reported_revoked() {
    let backend = Arc::new(CountingBackend::new());
    let app = app(backend.clone());
    let token = logout_token(json!({"iss": "https://idp", "sid": "abc123"}));

    let response = app
        .clone()
        .oneshot(form_add(format!("logout_token={token}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response).await.is_empty());
    assert_eq!(backend.adds(), vec!["sid-abc123".to_string()]);

    let response = app.oneshot(check("abc123")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"true");
}

#[tokio::test]
async fn never_added_id_is_not_revoked() {
    let app = app(Arc::new(CountingBackend::new()));

    let response = app.oneshot(check("never-added")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"false");
}

#[tokio::test]
async fn json_notification_is_accepted() {
    let backend = Arc::new(CountingBackend::new());
    let app = app(backend.clone());
    let token = logout_token(json!({"sid": "from-json"}));

    let response = app
        .clone()
        .oneshot(json_add(json!({"logout_token": token})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(check("from-json")).await.unwrap();
    assert_eq!(body_bytes(response).await, b"true");
}

#[tokio::test]
async fn token_signed_with_unlisted_algorithm_is_accepted() {
    let backend = Arc::new(CountingBackend::new());
    let app = app(backend.clone());
    let token = format!(
        "{}.{}.c2lnbmF0dXJl",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"ES512","typ":"logout+jwt"}"#),
        URL_SAFE_NO_PAD.encode(r#"{"sid":"es512-session","aud":"client"}"#)
    );

    let response = app
        .oneshot(form_add(format!("logout_token={token}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(backend.adds(), vec!["sid-es512-session".to_string()]);
}

#[tokio::test]
async fn repeated_add_is_idempotent() {
    let backend = Arc::new(InMemoryBloomBackend::with_defaults());
    let app = app(backend);
    let token = logout_token(json!({"sid": "twice"}));

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(form_add(format!("logout_token={token}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let response = app.oneshot(check("twice")).await.unwrap();
    assert_eq!(body_bytes(response).await, b"true");
}

#[tokio::test]
async fn configured_claim_changes_key_prefix() {
    let backend = Arc::new(CountingBackend::new());
    let token_config = TokenConfig {
        claim: ClaimName::new("sub").unwrap(),
        body_format: BodyFormat::Auto,
    };
    let app = app_with(backend.clone(), token_config);
    let token = logout_token(json!({"sid": "abc123", "sub": "user-9"}));

    app.clone()
        .oneshot(form_add(format!("logout_token={token}")))
        .await
        .unwrap();

    assert_eq!(backend.adds(), vec!["sub-user-9".to_string()]);
    let response = app.oneshot(check("user-9")).await.unwrap();
    assert_eq!(body_bytes(response).await, b"true");
}

// =============================================================================
// Failure Mapping
// =============================================================================

#[tokio::test]
async fn malformed_body_fails_without_backend_call() {
    let backend = Arc::new(CountingBackend::new());
    let app = app(backend.clone());

    let response = app
        .oneshot(form_add("garbage-without-separator".to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json["stage"], "body");
    assert!(backend.adds().is_empty());
}

#[tokio::test]
async fn token_without_sid_fails_without_backend_call() {
    let backend = Arc::new(CountingBackend::new());
    let app = app(backend.clone());
    let token = logout_token(json!({"sub": "user-1"}));

    let response = app
        .oneshot(form_add(format!("logout_token={token}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json["stage"], "claim");
    assert_eq!(json["error_code"], "CLAIM_MISSING");
    assert!(backend.adds().is_empty());
}

#[tokio::test]
async fn failing_check_returns_empty_bad_request() {
    let app = app(Arc::new(CountingBackend::failing_checks()));

    let response = app.oneshot(check("abc123")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn closed_backend_fails_add() {
    let backend = Arc::new(InMemoryBloomBackend::with_defaults());
    backend.close().await.unwrap();
    let app = app(backend);
    let token = logout_token(json!({"sid": "abc123"}));

    let response = app
        .oneshot(form_add(format!("logout_token={token}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json["stage"], "backend");
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_reports_ok() {
    let app = app(Arc::new(CountingBackend::new()));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json, json!({"status": "ok"}));
}
