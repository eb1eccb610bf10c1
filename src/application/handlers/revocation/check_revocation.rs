//! CheckRevocationHandler - Query handler for per-request revocation checks.

use std::sync::Arc;

use crate::domain::revocation::{ClaimName, RevocationKey};
use crate::ports::MembershipBackend;

use super::RevocationError;

/// Query asking whether a raw token identifier has been revoked.
///
/// The identifier is the claim value itself; no JWT decoding happens on
/// this path.
#[derive(Debug, Clone)]
pub struct CheckRevocationQuery {
    pub token_id: String,
}

/// Result of a revocation check.
#[derive(Debug, Clone)]
pub struct CheckRevocationResult {
    pub key: RevocationKey,
    /// `true` means "possibly revoked"; `false` means never revoked.
    pub revoked: bool,
}

/// Handler for revocation checks.
///
/// Called by the gateway on every authorised request, so it performs exactly
/// one backend round-trip and nothing else.
pub struct CheckRevocationHandler {
    backend: Arc<dyn MembershipBackend>,
    claim: ClaimName,
}

impl CheckRevocationHandler {
    pub fn new(backend: Arc<dyn MembershipBackend>, claim: ClaimName) -> Self {
        Self { backend, claim }
    }

    pub async fn handle(
        &self,
        query: CheckRevocationQuery,
    ) -> Result<CheckRevocationResult, RevocationError> {
        let key = RevocationKey::derive(&self.claim, &query.token_id);

        let revoked = self.backend.check(&key).await.map_err(|e| {
            tracing::error!(key = %key, error = %e, "Revocation check failed");
            e
        })?;

        tracing::debug!(key = %key, revoked, "Revocation check");
        Ok(CheckRevocationResult { key, revoked })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::membership::InMemoryBloomBackend;
    use crate::ports::BackendError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementation
    // ════════════════════════════════════════════════════════════════════════════

    struct ScriptedBackend {
        answer: Result<bool, BackendError>,
        checked: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        fn answering(answer: Result<bool, BackendError>) -> Self {
            Self {
                answer,
                checked: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MembershipBackend for ScriptedBackend {
        async fn add(&self, _key: &RevocationKey) -> Result<(), BackendError> {
            Ok(())
        }

        async fn check(&self, key: &RevocationKey) -> Result<bool, BackendError> {
            self.checked.lock().unwrap().push(key.to_string());
            self.answer.clone()
        }

        async fn close(&self) -> Result<(), BackendError> {
            Ok(())
        }
    }

    fn query(id: &str) -> CheckRevocationQuery {
        CheckRevocationQuery {
            token_id: id.to_string(),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn queries_backend_with_prefixed_key() {
        let backend = Arc::new(ScriptedBackend::answering(Ok(true)));
        let handler = CheckRevocationHandler::new(backend.clone(), ClaimName::default());

        let result = handler.handle(query("abc123")).await.unwrap();

        assert!(result.revoked);
        assert_eq!(result.key.as_str(), "sid-abc123");
        assert_eq!(*backend.checked.lock().unwrap(), vec!["sid-abc123".to_string()]);
    }

    #[tokio::test]
    async fn reports_backend_false() {
        let backend = Arc::new(ScriptedBackend::answering(Ok(false)));
        let handler = CheckRevocationHandler::new(backend, ClaimName::default());

        let result = handler.handle(query("never-added")).await.unwrap();

        assert!(!result.revoked);
    }

    #[tokio::test]
    async fn backend_error_is_surfaced() {
        let backend = Arc::new(ScriptedBackend::answering(Err(BackendError::request_failed(
            "WRONGTYPE",
        ))));
        let handler = CheckRevocationHandler::new(backend, ClaimName::default());

        let err = handler.handle(query("abc123")).await.unwrap_err();

        assert_eq!(
            err,
            RevocationError::Backend(BackendError::request_failed("WRONGTYPE"))
        );
    }

    #[tokio::test]
    async fn added_key_checks_true_after_repeated_add() {
        let backend = Arc::new(InMemoryBloomBackend::with_defaults());
        let key = RevocationKey::derive(&ClaimName::default(), "abc123");
        backend.add(&key).await.unwrap();
        backend.add(&key).await.unwrap();

        let handler = CheckRevocationHandler::new(backend, ClaimName::default());
        let result = handler.handle(query("abc123")).await.unwrap();

        assert!(result.revoked);
    }
}
